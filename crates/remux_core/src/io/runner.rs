//! Command runner for external tools.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Errors from running an external tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// An input file handed to a tool does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The tool could not be started at all.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool printed output that is not valid UTF-8.
    #[error("{tool} produced invalid UTF-8 output: {source}")]
    InvalidUtf8 {
        tool: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The tool printed output that could not be parsed.
    #[error("Failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },
}

impl ToolError {
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result type for tool invocations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Run a tool and capture its stdout.
///
/// A non-zero exit status is an error carrying the tool's stderr.
pub fn run_captured<I, S>(tool: &str, program: &Path, args: I) -> ToolResult<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    tracing::debug!("$ {:?}", cmd);

    let output = cmd.output().map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ToolError::CommandFailed {
            tool: tool.to_string(),
            exit_code: exit_code(output.status),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Run a tool with inherited stdio and return its exit code.
///
/// The tool's own output goes straight to the terminal.
pub fn run_inherited<I, S>(tool: &str, program: &Path, args: I) -> ToolResult<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    tracing::debug!("$ {:?}", cmd);

    let status = cmd.status().map_err(|source| ToolError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    Ok(exit_code(status))
}

/// Exit code of a finished process, `-1` if it was killed by a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
