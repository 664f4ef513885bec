//! remux core - backend logic for the `remux` tool
//!
//! Remuxes a source container into Matroska by driving three external
//! tools: ffprobe for metadata, ffmpeg for subtitle conversion to SRT and
//! mkvmerge for writing the final file. Container and track metadata is
//! carried over as Matroska tag XML.

pub mod config;
pub mod io;
pub mod logging;
pub mod models;
pub mod mux;
pub mod orchestrator;
pub mod probe;
pub mod subtitles;
pub mod tags;

pub use orchestrator::{remux, Context, RunOutcome};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
