//! Settings struct with TOML-based sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Global tag overrides applied when none are configured: drop timestamps
/// that identify when and by whom the file was bought.
pub const DEFAULT_GLOBAL_OVERRIDES: &str = r#"{"creation_time": null, "purchase_date": null}"#;

/// Track tag overrides applied when none are configured.
pub const DEFAULT_TRACK_OVERRIDES: &str = r#"{"creation_time": null}"#;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Tag overrides.
    #[serde(default)]
    pub overrides: OverrideSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Paths to the external tools. Bare names are looked up in `PATH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    #[serde(default = "default_mkvmerge")]
    pub mkvmerge: String,
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_mkvmerge() -> String {
    "mkvmerge".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffprobe: default_ffprobe(),
            ffmpeg: default_ffmpeg(),
            mkvmerge: default_mkvmerge(),
        }
    }
}

/// Tag overrides as JSON object text, the same format the CLI accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideSettings {
    /// Merged into the container tags.
    #[serde(default = "default_global_tags")]
    pub global_tags: String,

    /// Merged into every track's tags.
    #[serde(default = "default_track_tags")]
    pub track_tags: String,
}

fn default_global_tags() -> String {
    DEFAULT_GLOBAL_OVERRIDES.to_string()
}

fn default_track_tags() -> String {
    DEFAULT_TRACK_OVERRIDES.to_string()
}

impl Default for OverrideSettings {
    fn default() -> Self {
        Self {
            global_tags: default_global_tags(),
            track_tags: default_track_tags(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Log the mkvmerge options one per line before running it.
    #[serde(default)]
    pub show_options_pretty: bool,
}
