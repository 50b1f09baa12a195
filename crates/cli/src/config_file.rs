use doxtree_core::{Config, ConfigBuilder, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk generation settings. Relative paths resolve against the file's directory.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the indexer's `index.xml`; detail documents live beside it.
    pub index_path: Option<PathBuf>,
    /// Directory receiving the generated documents.
    pub output_dir: Option<PathBuf>,
    /// File name of the root document, e.g. `library_root.rst`.
    pub root_file_name: Option<String>,
    pub root_file_title: Option<String>,
    /// Prefix removed from every recovered source location.
    pub strip_from_path: Option<PathBuf>,
    #[serde(default)]
    pub after_title_description: String,
    #[serde(default)]
    pub after_body_summary: String,
    #[serde(default)]
    pub tree_view: bool,
    pub full_toctree_max_depth: Option<usize>,
    #[serde(default)]
    pub append_file_directive: bool,
}

/// Command-line values that win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub tree_view: bool,
    pub output: Option<PathBuf>,
    pub max_depth: Option<usize>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn into_builder(self, base: &Path, overrides: &Overrides) -> ConfigBuilder {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        let mut builder = Config::builder()
            .after_title_description(self.after_title_description)
            .after_body_summary(self.after_body_summary)
            .tree_view(self.tree_view || overrides.tree_view)
            .append_file_directive(self.append_file_directive);
        if let Some(path) = self.index_path {
            builder = builder.index_path(resolve(path));
        }
        if let Some(path) = overrides.output.clone().or(self.output_dir) {
            builder = builder.output_dir(resolve(path));
        }
        if let Some(name) = self.root_file_name {
            builder = builder.root_file_name(name);
        }
        if let Some(title) = self.root_file_title {
            builder = builder.root_file_title(title);
        }
        if let Some(path) = self.strip_from_path {
            builder = builder.strip_from_path(resolve(path));
        }
        if let Some(depth) = overrides.max_depth.or(self.full_toctree_max_depth) {
            builder = builder.full_toctree_max_depth(depth);
        }
        builder
    }
}

/// Loads `path` and resolves it into a validated [`Config`].
pub fn resolve_config(path: &Path, overrides: &Overrides) -> Result<Config> {
    let file = ConfigFile::load(path)?;
    let base = path.parent().unwrap_or(Path::new("."));
    Ok(file.into_builder(base, overrides).build()?)
}
