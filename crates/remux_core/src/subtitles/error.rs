//! Subtitle error types.

use std::path::PathBuf;

use crate::io::ToolError;

/// Errors that can occur during subtitle conversion.
#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    /// ffmpeg failed or produced unusable output.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Failed to write the converted subtitle file.
    #[error("Failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for subtitle operations.
pub type SubtitleResult<T> = Result<T, SubtitleError>;
