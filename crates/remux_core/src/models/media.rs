//! Media-related data structures (probe results and streams).

use std::path::PathBuf;

use super::enums::TrackType;
use super::tags::Tags;

/// Codecs that only ever carry still images. A stream with one of these is
/// treated as embedded cover art.
const IMAGE_CODECS: &[&str] = &["mjpeg", "png", "bmp", "gif", "webp"];

/// A single stream within the source container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Stream index (ffprobe ordering, also mkvmerge's track id for the source).
    pub index: u32,
    /// Codec name (e.g., "h264", "aac", "mov_text").
    pub codec_name: String,
    /// Type of stream.
    pub codec_type: TrackType,
    /// Stream-level tags.
    pub tags: Tags,
}

impl StreamInfo {
    /// Create a stream with no tags.
    pub fn new(index: u32, codec_name: impl Into<String>, codec_type: TrackType) -> Self {
        Self {
            index,
            codec_name: codec_name.into(),
            codec_type,
            tags: Tags::new(),
        }
    }

    /// Set the stream tags.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Whether this stream is a still image (cover art).
    pub fn is_cover_art(&self) -> bool {
        IMAGE_CODECS.contains(&self.codec_name.as_str())
    }

    pub fn is_subtitle(&self) -> bool {
        self.codec_type == TrackType::Subtitle
    }

    /// Language code from the `language` tag, if present.
    pub fn language(&self) -> Option<&str> {
        self.tags.get("language")
    }
}

/// Result of probing a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Path that was probed.
    pub source: PathBuf,
    /// Container-level tags (`format.tags`).
    pub format_tags: Tags,
    /// Streams in ffprobe order.
    pub streams: Vec<StreamInfo>,
}

impl ProbeResult {
    /// Container title, if tagged.
    pub fn title(&self) -> Option<&str> {
        self.format_tags.get("title")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_codecs_are_cover_art() {
        assert!(StreamInfo::new(3, "mjpeg", TrackType::Video).is_cover_art());
        assert!(StreamInfo::new(3, "png", TrackType::Video).is_cover_art());
        assert!(!StreamInfo::new(0, "h264", TrackType::Video).is_cover_art());
        assert!(!StreamInfo::new(0, "", TrackType::Unknown).is_cover_art());
    }

    #[test]
    fn language_comes_from_tags() {
        let tags: Tags = [("language", "eng")].into_iter().collect();
        let stream = StreamInfo::new(1, "aac", TrackType::Audio).with_tags(tags);
        assert_eq!(stream.language(), Some("eng"));
        assert_eq!(StreamInfo::new(0, "h264", TrackType::Video).language(), None);
    }

    #[test]
    fn title_is_optional() {
        let mut probe = ProbeResult::default();
        assert_eq!(probe.title(), None);
        probe.format_tags.insert("title", "Movie");
        assert_eq!(probe.title(), Some("Movie"));
    }
}
