use super::unescape_xml;
use doxtree_api::{ApiError, ApiResult, CompoundRecord, CompoundSource, NodeKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<(compound|member)\s+refid="([^"]*)"\s+kind="([^"]*)"\s*>\s*<name>(.*?)</name>|</compound>"#,
    )
    .expect("valid index token pattern")
});

/// Reads compound records from a Doxygen `index.xml`.
#[derive(Debug, Clone)]
pub struct IndexXml {
    path: PathBuf,
}

impl IndexXml {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses index text. Compounds and members of kinds outside
    /// [`NodeKind`] (pages, examples, slots, ...) are dropped.
    pub fn parse(text: &str) -> Vec<CompoundRecord> {
        let mut records = Vec::new();
        let mut current: Option<CompoundRecord> = None;
        let mut skipping = false;

        for caps in TOKEN.captures_iter(text) {
            let Some(tag) = caps.get(1) else {
                if let Some(done) = current.take() {
                    records.push(done);
                }
                skipping = false;
                continue;
            };
            let refid = &caps[2];
            let kind_tag = &caps[3];
            let name = unescape_xml(caps[4].trim());

            match tag.as_str() {
                "compound" => {
                    if let Some(done) = current.take() {
                        records.push(done);
                    }
                    match kind_tag.parse::<NodeKind>() {
                        Ok(kind) => {
                            current =
                                Some(CompoundRecord::new(kind, name, refid).with_members(Vec::new()));
                            skipping = false;
                        }
                        Err(e) => {
                            debug!(refid, error = %e, "Skipping compound");
                            skipping = true;
                        }
                    }
                }
                _ => {
                    if skipping {
                        continue;
                    }
                    let Some(owner) = current.as_mut() else {
                        continue;
                    };
                    match kind_tag.parse::<NodeKind>() {
                        Ok(kind) => owner.push_member(CompoundRecord::new(kind, name, refid)),
                        Err(e) => debug!(refid, error = %e, "Skipping member"),
                    }
                }
            }
        }
        if let Some(done) = current.take() {
            records.push(done);
        }
        records
    }
}

impl CompoundSource for IndexXml {
    fn compounds(&self) -> ApiResult<Vec<CompoundRecord>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ApiError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text))
    }
}
