//! Tag error types.

use std::path::PathBuf;

/// Errors that can occur while handling tags.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// Override JSON was not valid JSON.
    #[error("Invalid override JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Override JSON was valid but had the wrong shape.
    #[error("Invalid tag overrides: {0}")]
    InvalidOverrides(String),

    /// Tag XML could not be parsed.
    #[error("Malformed tag XML: {0}")]
    MalformedXml(String),

    /// Failed to write a tag file.
    #[error("Failed to write tag file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TagError {
    pub fn invalid_overrides(message: impl Into<String>) -> Self {
        Self::InvalidOverrides(message.into())
    }
}

/// Result type for tag operations.
pub type TagResult<T> = Result<T, TagError>;
