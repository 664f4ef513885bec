//! External process execution.
//!
//! Every tool (ffprobe, ffmpeg, mkvmerge) is run as a blocking child
//! process, one at a time.

mod runner;

pub use runner::{exit_code, run_captured, run_inherited, ToolError, ToolResult};
