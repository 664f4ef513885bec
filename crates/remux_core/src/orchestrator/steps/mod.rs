//! Pipeline step implementations.

mod cleanup;
mod global_tags;
mod mux;
mod probe;
mod tracks;

pub use cleanup::CleanupStep;
pub use global_tags::GlobalTagsStep;
pub use mux::MuxStep;
pub use probe::ProbeStep;
pub use tracks::TracksStep;
