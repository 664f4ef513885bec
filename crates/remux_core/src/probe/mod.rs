//! Media probing with ffprobe.
//!
//! Reads container tags and the ordered stream list of a source file.

mod ffprobe;

pub use ffprobe::{parse_probe_json, probe_file};
