//! Muxing module for mkvmerge integration.
//!
//! # Architecture
//!
//! - **collection**: `TrackCollection`, the per-file record of which track
//!   ids received a tag file and which language each one carries
//! - **options_builder**: Converts the collection, global tags and raw
//!   arguments into mkvmerge command tokens

mod collection;
mod options_builder;

pub use collection::{tag_path, TrackCollection};
pub use options_builder::{format_tokens_pretty, global_tags_path, MkvmergeOptionsBuilder};
