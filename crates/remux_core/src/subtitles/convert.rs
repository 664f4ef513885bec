//! Subtitle extraction with ffmpeg.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::error::{SubtitleError, SubtitleResult};
use super::sanitize::sanitize_srt;
use crate::io::{run_captured, ToolError, ToolResult};

const TOOL: &str = "ffmpeg";

/// Path of the SRT file extracted from stream `index` of `source`.
pub fn subtitle_path(source: &Path, index: u32) -> PathBuf {
    let mut path = source.as_os_str().to_owned();
    path.push(format!(".sub_{}.srt", index));
    PathBuf::from(path)
}

/// Transcode one subtitle stream to SRT and return the raw text.
///
/// Runs `ffmpeg -i <source> -map 0:<index> -scodec srt -f srt -`.
pub fn extract_srt(ffmpeg: &Path, source: &Path, index: u32) -> ToolResult<String> {
    if !source.exists() {
        return Err(ToolError::FileNotFound(source.to_path_buf()));
    }

    let map = format!("0:{}", index);
    let args: [&OsStr; 11] = [
        OsStr::new("-v"),
        OsStr::new("error"),
        OsStr::new("-i"),
        source.as_os_str(),
        OsStr::new("-map"),
        OsStr::new(&map),
        OsStr::new("-scodec"),
        OsStr::new("srt"),
        OsStr::new("-f"),
        OsStr::new("srt"),
        OsStr::new("-"),
    ];
    let stdout = run_captured(TOOL, ffmpeg, args)?;

    String::from_utf8(stdout).map_err(|source| ToolError::InvalidUtf8 {
        tool: TOOL.to_string(),
        source,
    })
}

/// Extract, sanitize and write one subtitle stream to `dest`.
pub fn convert_subtitle(
    ffmpeg: &Path,
    source: &Path,
    index: u32,
    dest: &Path,
) -> SubtitleResult<()> {
    tracing::info!("Converting subtitle stream {} to {}", index, dest.display());

    let srt = sanitize_srt(&extract_srt(ffmpeg, source, index)?);

    std::fs::write(dest, srt).map_err(|source| SubtitleError::WriteError {
        path: dest.to_path_buf(),
        source,
    })
}
