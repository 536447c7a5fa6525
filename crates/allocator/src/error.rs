use thiserror::Error;

/// Result type for allocator operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while splitting a corpus
#[derive(Error, Debug)]
pub enum SplitError {
    /// Input does not match the expected packet schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// Input is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}
