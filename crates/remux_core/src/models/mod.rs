//! Data models for remux.
//!
//! - Track types as reported by ffprobe
//! - Probe results (container tags and ordered streams)
//! - Tag maps and user supplied tag overrides

mod enums;
mod media;
mod tags;

pub use enums::TrackType;
pub use media::{ProbeResult, StreamInfo};
pub use tags::{TagOverrides, Tags};
