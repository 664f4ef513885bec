//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Job → Step → Operation → Detail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::io::ToolError;
use crate::subtitles::SubtitleError;
use crate::tags::TagError;

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Job '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// A step failed after mkvmerge had already run.
    #[error(
        "Job '{job_name}' failed at step '{step_name}' after mkvmerge exited with code {exit_code}: {source}"
    )]
    AfterMerge {
        job_name: String,
        step_name: String,
        exit_code: i32,
        /// Temp files deleted before the failure.
        deleted: Vec<PathBuf>,
        #[source]
        source: StepError,
    },

    /// The pipeline finished without recording a merge result.
    #[error("Job '{job_name}' finished without running mkvmerge")]
    Incomplete { job_name: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }
}

impl PipelineError {
    /// mkvmerge's exit code, if it ran before the failure.
    pub fn merge_exit_code(&self) -> Option<i32> {
        match self {
            Self::AfterMerge { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An external tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Tag handling failed.
    #[error(transparent)]
    Tags(#[from] TagError),

    /// Subtitle conversion failed.
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A required file was not found.
    #[error("Required file not found: {path}")]
    FileNotFound { path: String },

    /// A precondition was not met.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),
}

impl StepError {
    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_displays_tool_context() {
        let err = StepError::from(ToolError::CommandFailed {
            tool: "ffprobe".to_string(),
            exit_code: 1,
            message: "Invalid data found when processing input".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("ffprobe"));
        assert!(msg.contains("exit code 1"));
    }

    #[test]
    fn only_post_merge_failures_carry_exit_code() {
        let before = PipelineError::step_failed("in.m4v", "Probe", StepError::file_not_found("in.m4v"));
        assert_eq!(before.merge_exit_code(), None);

        let after = PipelineError::AfterMerge {
            job_name: "in.m4v".to_string(),
            step_name: "Cleanup".to_string(),
            exit_code: 0,
            deleted: Vec::new(),
            source: StepError::precondition_failed("x"),
        };
        assert_eq!(after.merge_exit_code(), Some(0));
        assert!(after.to_string().contains("exited with code 0"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::file_not_found("/path/to/in.m4v");
        let pipeline_err = PipelineError::step_failed("in.m4v", "Probe", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("in.m4v"));
        assert!(msg.contains("Probe"));
        assert!(msg.contains("/path/to/in.m4v"));
    }
}
