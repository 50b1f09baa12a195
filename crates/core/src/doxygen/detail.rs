use doxtree_api::{ApiError, ApiResult, DetailSource};
use std::path::{Path, PathBuf};

/// Detail documents stored as `<dir>/<refid>.xml`.
#[derive(Debug, Clone)]
pub struct XmlDirectory {
    dir: PathBuf,
}

impl XmlDirectory {
    /// Fails when `dir` is unset or does not exist; nothing can be resolved without it.
    pub fn new(dir: impl Into<PathBuf>) -> ApiResult<Self> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(ApiError::InvalidArgument(
                "the indexer output directory was not specified".to_string(),
            ));
        }
        if !dir.is_dir() {
            return Err(ApiError::InvalidArgument(format!(
                "indexer output directory `{}` does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DetailSource for XmlDirectory {
    fn detail(&self, refid: &str) -> ApiResult<String> {
        let path = self.dir.join(format!("{refid}.xml"));
        std::fs::read_to_string(&path).map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_or_missing_dir_rejected() {
        assert!(matches!(XmlDirectory::new(""), Err(ApiError::InvalidArgument(_))));
        assert!(matches!(
            XmlDirectory::new("/no/such/doxygen/xml"),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reads_refid_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_8h.xml"), "<location file=\"a.h\"/>").unwrap();
        let source = XmlDirectory::new(dir.path()).unwrap();
        assert!(source.detail("a_8h").unwrap().contains("a.h"));
        assert!(matches!(source.detail("b_8h"), Err(ApiError::Io { .. })));
    }
}
