//! Subtitle conversion to SubRip.
//!
//! Each subtitle stream is transcoded to SRT by ffmpeg, cleaned of the
//! inline font markup and `\h` escapes ffmpeg leaves behind, and written
//! next to the source file as `<source>.sub_<index>.srt`.

mod convert;
mod error;
mod sanitize;

pub use convert::{convert_subtitle, extract_srt, subtitle_path};
pub use error::{SubtitleError, SubtitleResult};
pub use sanitize::sanitize_srt;
