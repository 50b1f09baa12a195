use doxtree_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("setting `{0}` must not be empty")]
    Empty(&'static str),
    #[error("full listing depth must be at least 1, got {0}")]
    InvalidDepth(usize),
    #[error("strip path `{0}` is not an existing directory")]
    InvalidStripPath(String),
}

#[derive(Error, Debug)]
pub enum DoxtreeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Node `{node}` is owned by both `{first}` and `{second}`")]
    OwnershipConflict {
        node: String,
        first: String,
        second: String,
    },
    #[error("Ownership cycle through `{0}`")]
    CycleDetected(String),
    #[error("Failed to write document `{id}`: {source}")]
    Document {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read detail document for file `{file}`: {message}")]
    Detail { file: String, message: String },
    #[error("Indexer query failed: {0}")]
    Upstream(#[from] ApiError),
    #[error("Precondition failed: {0}")]
    Precondition(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DoxtreeError {
    /// Errors that abort the whole run rather than a single unit.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DoxtreeError::Document { .. } | DoxtreeError::Detail { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DoxtreeError>;
