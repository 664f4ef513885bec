//! File probing using `ffprobe -of json`.

use std::ffi::OsStr;
use std::path::Path;

use serde_json::Value;

use crate::io::{run_captured, ToolError, ToolResult};
use crate::models::{ProbeResult, StreamInfo, Tags, TrackType};

const TOOL: &str = "ffprobe";

/// Probe a media file for container tags and streams.
///
/// `ffprobe` is the executable to run; a bare name is resolved via `PATH`.
pub fn probe_file(ffprobe: &Path, path: &Path) -> ToolResult<ProbeResult> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", path.display());

    let mut args: Vec<&OsStr> = [
        "-v",
        "error",
        "-of",
        "json=c=1",
        "-show_streams",
        "-show_entries",
        "format",
    ]
    .into_iter()
    .map(OsStr::new)
    .collect();
    args.push(path.as_os_str());

    let stdout = run_captured(TOOL, ffprobe, args)?;

    let json: Value = serde_json::from_slice(&stdout)
        .map_err(|e| ToolError::parse_error(TOOL, e.to_string()))?;

    let mut result = parse_probe_json(&json)?;
    result.source = path.to_path_buf();

    tracing::debug!(
        "{}: {} container tag(s), {} stream(s)",
        path.display(),
        result.format_tags.len(),
        result.streams.len()
    );

    Ok(result)
}

/// Parse the JSON document printed by ffprobe.
///
/// Missing `tags` objects are treated as empty.
pub fn parse_probe_json(json: &Value) -> ToolResult<ProbeResult> {
    let format = json
        .get("format")
        .ok_or_else(|| ToolError::parse_error(TOOL, "missing 'format' section"))?;

    let mut result = ProbeResult {
        format_tags: format.get("tags").map(Tags::from_json).unwrap_or_default(),
        ..Default::default()
    };

    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            result.streams.push(parse_stream(stream)?);
        }
    }

    Ok(result)
}

/// Parse a single stream entry.
fn parse_stream(stream: &Value) -> ToolResult<StreamInfo> {
    let index = stream
        .get("index")
        .and_then(|i| i.as_u64())
        .ok_or_else(|| ToolError::parse_error(TOOL, "stream without an 'index'"))?;
    let index = u32::try_from(index)
        .map_err(|_| ToolError::parse_error(TOOL, format!("stream index {} out of range", index)))?;

    let codec_name = stream
        .get("codec_name")
        .and_then(|c| c.as_str())
        .unwrap_or("");

    let codec_type = stream
        .get("codec_type")
        .and_then(|c| c.as_str())
        .map(TrackType::from_codec_type)
        .unwrap_or(TrackType::Unknown);

    let tags = stream.get("tags").map(Tags::from_json).unwrap_or_default();

    Ok(StreamInfo::new(index, codec_name, codec_type).with_tags(tags))
}
