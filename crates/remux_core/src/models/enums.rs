//! Core enums used throughout the crate.

/// Type of media stream, as reported in ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    Unknown,
}

impl TrackType {
    /// Parse an ffprobe `codec_type` string. Anything unrecognised is `Unknown`.
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => TrackType::Video,
            "audio" => TrackType::Audio,
            "subtitle" => TrackType::Subtitle,
            "data" => TrackType::Data,
            "attachment" => TrackType::Attachment,
            _ => TrackType::Unknown,
        }
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackType::Video => write!(f, "video"),
            TrackType::Audio => write!(f, "audio"),
            TrackType::Subtitle => write!(f, "subtitle"),
            TrackType::Data => write!(f, "data"),
            TrackType::Attachment => write!(f, "attachment"),
            TrackType::Unknown => write!(f, "unknown"),
        }
    }
}
