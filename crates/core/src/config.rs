//! Resolved generation settings.
//!
//! A [`Config`] is built once through [`ConfigBuilder`], validated before any
//! graph work starts, and then passed by reference to every phase.

use crate::error::ConfigError;
use doxtree_api::NodeKind;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_TOCTREE_MAX_DEPTH: usize = 5;

/// Supplies the directive options written under the kind-specific body of a document.
pub trait ContentHook: Send + Sync {
    fn options(&self, kind: NodeKind) -> Vec<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContentHook;

impl ContentHook for DefaultContentHook {
    fn options(&self, kind: NodeKind) -> Vec<String> {
        if kind.is_class_like() {
            vec![
                ":members:".to_string(),
                ":protected-members:".to_string(),
                ":undoc-members:".to_string(),
            ]
        } else {
            Vec::new()
        }
    }
}

/// Adapts a closure into a [`ContentHook`].
pub struct FnContentHook<F>(pub F);

impl<F> ContentHook for FnContentHook<F>
where
    F: Fn(NodeKind) -> Vec<String> + Send + Sync,
{
    fn options(&self, kind: NodeKind) -> Vec<String> {
        (self.0)(kind)
    }
}

#[derive(Clone)]
pub struct Config {
    pub index_path: PathBuf,
    pub output_dir: PathBuf,
    pub root_file_name: String,
    pub root_file_title: String,
    pub strip_from_path: String,
    pub after_title_description: String,
    pub after_body_summary: String,
    pub tree_view: bool,
    pub full_toctree_max_depth: usize,
    pub append_file_directive: bool,
    pub content_hook: Arc<dyn ContentHook>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("index_path", &self.index_path)
            .field("output_dir", &self.output_dir)
            .field("root_file_name", &self.root_file_name)
            .field("root_file_title", &self.root_file_title)
            .field("strip_from_path", &self.strip_from_path)
            .field("tree_view", &self.tree_view)
            .field("full_toctree_max_depth", &self.full_toctree_max_depth)
            .field("append_file_directive", &self.append_file_directive)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Directory holding the per-refid detail documents, next to the index.
    pub fn detail_dir(&self) -> PathBuf {
        self.index_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Root document id, without any markup extension.
    pub fn root_id(&self) -> &str {
        self.root_file_name
            .strip_suffix(".rst")
            .unwrap_or(&self.root_file_name)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    index_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    root_file_name: Option<String>,
    root_file_title: Option<String>,
    strip_from_path: Option<PathBuf>,
    after_title_description: String,
    after_body_summary: String,
    tree_view: bool,
    full_toctree_max_depth: Option<usize>,
    append_file_directive: bool,
    content_hook: Option<Arc<dyn ContentHook>>,
}

impl ConfigBuilder {
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn root_file_name(mut self, name: impl Into<String>) -> Self {
        self.root_file_name = Some(name.into());
        self
    }

    pub fn root_file_title(mut self, title: impl Into<String>) -> Self {
        self.root_file_title = Some(title.into());
        self
    }

    pub fn strip_from_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.strip_from_path = Some(path.into());
        self
    }

    pub fn after_title_description(mut self, text: impl Into<String>) -> Self {
        self.after_title_description = text.into();
        self
    }

    pub fn after_body_summary(mut self, text: impl Into<String>) -> Self {
        self.after_body_summary = text.into();
        self
    }

    pub fn tree_view(mut self, enabled: bool) -> Self {
        self.tree_view = enabled;
        self
    }

    pub fn full_toctree_max_depth(mut self, depth: usize) -> Self {
        self.full_toctree_max_depth = Some(depth);
        self
    }

    pub fn append_file_directive(mut self, enabled: bool) -> Self {
        self.append_file_directive = enabled;
        self
    }

    pub fn content_hook(mut self, hook: Arc<dyn ContentHook>) -> Self {
        self.content_hook = Some(hook);
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let index_path = required_path("index_path", self.index_path)?;
        let output_dir = required_path("output_dir", self.output_dir)?;
        let root_file_name = required_str("root_file_name", self.root_file_name)?;
        let root_file_title = required_str("root_file_title", self.root_file_title)?;
        let strip = required_path("strip_from_path", self.strip_from_path)?;

        if !strip.is_dir() {
            return Err(ConfigError::InvalidStripPath(strip.display().to_string()));
        }
        let strip = std::path::absolute(&strip)
            .map_err(|_| ConfigError::InvalidStripPath(strip.display().to_string()))?;

        let depth = self
            .full_toctree_max_depth
            .unwrap_or(DEFAULT_TOCTREE_MAX_DEPTH);
        if depth < 1 {
            return Err(ConfigError::InvalidDepth(depth));
        }

        Ok(Config {
            index_path,
            output_dir,
            root_file_name,
            root_file_title,
            strip_from_path: strip.to_string_lossy().into_owned(),
            after_title_description: self.after_title_description,
            after_body_summary: self.after_body_summary,
            tree_view: self.tree_view,
            full_toctree_max_depth: depth,
            append_file_directive: self.append_file_directive,
            content_hook: self
                .content_hook
                .unwrap_or_else(|| Arc::new(DefaultContentHook)),
        })
    }
}

fn required_path(field: &'static str, value: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match value {
        None => Err(ConfigError::Missing(field)),
        Some(p) if p.as_os_str().is_empty() => Err(ConfigError::Empty(field)),
        Some(p) => Ok(p),
    }
}

fn required_str(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        None => Err(ConfigError::Missing(field)),
        Some(s) if s.trim().is_empty() => Err(ConfigError::Empty(field)),
        Some(s) => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(dir: &Path) -> ConfigBuilder {
        Config::builder()
            .index_path(dir.join("xml/index.xml"))
            .output_dir(dir.join("api"))
            .root_file_name("library_root.rst")
            .root_file_title("Library API")
            .strip_from_path(dir)
    }

    #[test]
    fn test_defaults_applied() {
        let dir = tempfile::tempdir().unwrap();
        let config = complete(dir.path()).build().unwrap();
        assert_eq!(config.full_toctree_max_depth, 5);
        assert!(!config.tree_view);
        assert!(!config.append_file_directive);
        assert_eq!(config.after_title_description, "");
        assert_eq!(config.root_id(), "library_root");
        assert_eq!(config.detail_dir(), dir.path().join("xml"));
    }

    #[test]
    fn test_missing_required_setting() {
        let err = Config::builder()
            .output_dir("api")
            .root_file_name("root.rst")
            .root_file_title("API")
            .strip_from_path(".")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("index_path")));
    }

    #[test]
    fn test_empty_title_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = complete(dir.path()).root_file_title("  ").build().unwrap_err();
        assert!(matches!(err, ConfigError::Empty("root_file_title")));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = complete(dir.path())
            .full_toctree_max_depth(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDepth(0)));
    }

    #[test]
    fn test_strip_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = complete(dir.path())
            .strip_from_path(dir.path().join("nope"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStripPath(_)));
    }

    #[test]
    fn test_default_hook_only_for_class_like() {
        let hook = DefaultContentHook;
        assert_eq!(hook.options(NodeKind::Struct).len(), 3);
        assert!(hook.options(NodeKind::Enum).is_empty());

        let custom = FnContentHook(|kind: NodeKind| vec![format!(":{}:", kind)]);
        assert_eq!(custom.options(NodeKind::Enum), vec![":enum:".to_string()]);
    }
}
