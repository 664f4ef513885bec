//! Context and state shared by pipeline steps.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::models::{ProbeResult, TagOverrides};
use crate::mux::TrackCollection;
use crate::tags::TagResult;

/// Locations of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
    pub mkvmerge: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffprobe: PathBuf::from("ffprobe"),
            ffmpeg: PathBuf::from("ffmpeg"),
            mkvmerge: PathBuf::from("mkvmerge"),
        }
    }
}

/// Immutable inputs for one remux run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Source media file.
    pub input: PathBuf,
    /// Matroska file to create.
    pub output: PathBuf,
    /// External tool locations.
    pub tools: ToolPaths,
    /// Merged into the container tags.
    pub global_overrides: TagOverrides,
    /// Merged into every track's tags.
    pub track_overrides: TagOverrides,
    /// Extra mkvmerge arguments, appended verbatim.
    pub raw_args: Vec<String>,
    /// Log the mkvmerge options one per line.
    pub show_options_pretty: bool,
}

impl Context {
    /// Create a context with default tool names and no overrides.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            tools: ToolPaths::default(),
            global_overrides: TagOverrides::new(),
            track_overrides: TagOverrides::new(),
            raw_args: Vec::new(),
            show_options_pretty: false,
        }
    }

    /// Create a context from loaded settings.
    ///
    /// Fails if either override setting is not a valid JSON object.
    pub fn from_settings(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        settings: &Settings,
    ) -> TagResult<Self> {
        Ok(Self {
            tools: ToolPaths {
                ffprobe: PathBuf::from(&settings.tools.ffprobe),
                ffmpeg: PathBuf::from(&settings.tools.ffmpeg),
                mkvmerge: PathBuf::from(&settings.tools.mkvmerge),
            },
            global_overrides: settings.overrides.global_tags.parse()?,
            track_overrides: settings.overrides.track_tags.parse()?,
            show_options_pretty: settings.logging.show_options_pretty,
            ..Self::new(input, output)
        })
    }

    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_global_overrides(mut self, overrides: TagOverrides) -> Self {
        self.global_overrides = overrides;
        self
    }

    pub fn with_track_overrides(mut self, overrides: TagOverrides) -> Self {
        self.track_overrides = overrides;
        self
    }

    pub fn with_raw_args(mut self, raw_args: Vec<String>) -> Self {
        self.raw_args = raw_args;
        self
    }

    /// Name used for this job in errors and logs (the input file name).
    pub fn job_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.input.to_string_lossy().to_string())
    }
}

/// Outcome of a step that ran without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed its work.
    Success,
    /// Step decided not to run; the reason is logged.
    Skipped(String),
}

/// Result of running mkvmerge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxOutput {
    /// mkvmerge exit code (-1 if killed by a signal).
    pub exit_code: i32,
    /// Arguments passed to mkvmerge.
    pub command: Vec<OsString>,
}

impl MuxOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Mutable state accumulated by the steps of one run.
#[derive(Debug, Clone, Default)]
pub struct JobState {
    /// Probe result (Probe step).
    pub probe: Option<ProbeResult>,
    /// Container title captured before overrides (GlobalTags step).
    pub title: Option<String>,
    /// Global tag XML (GlobalTags step).
    pub global_tags_path: Option<PathBuf>,
    /// Tagged tracks per input file (Tracks step).
    pub collection: TrackCollection,
    /// Extracted SRT files (Tracks step).
    pub subtitle_files: Vec<PathBuf>,
    /// mkvmerge result (Mux step).
    pub mux: Option<MuxOutput>,
    /// Temp files removed (Cleanup step).
    pub deleted: Vec<PathBuf>,
}

impl JobState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every temporary file this run created, in deletion order: the global
    /// tag XML, extracted subtitles, then per-track tag XML.
    pub fn temp_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        files.extend(self.global_tags_path.iter().cloned());
        files.extend(self.subtitle_files.iter().cloned());
        files.extend(self.collection.tag_files());
        files
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// mkvmerge exit code.
    pub exit_code: i32,
    /// Temporary files the run created.
    pub temp_files: Vec<PathBuf>,
    /// Temporary files that were deleted (empty unless mkvmerge succeeded).
    pub deleted: Vec<PathBuf>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Temp files still on disk because the merge failed.
    pub fn retained(&self) -> impl Iterator<Item = &Path> {
        self.temp_files
            .iter()
            .filter(|f| !self.deleted.contains(*f))
            .map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn temp_files_are_ordered() {
        let mut state = JobState::new();
        state.global_tags_path = Some(PathBuf::from("in.global_tags.xml"));
        state.subtitle_files.push(PathBuf::from("in.sub_2.srt"));
        state.collection.record(Path::new("in"), 0, None);
        state.collection.record(Path::new("in.sub_2.srt"), 0, None);

        assert_eq!(
            state.temp_files(),
            [
                PathBuf::from("in.global_tags.xml"),
                PathBuf::from("in.sub_2.srt"),
                PathBuf::from("in.0.xml"),
                PathBuf::from("in.sub_2.srt.0.xml"),
            ]
        );
    }

    #[test]
    fn context_from_default_settings() {
        let mut settings = Settings::default();
        settings.tools.mkvmerge = "/opt/mkvmerge".to_string();
        settings.logging.level = LogLevel::Debug;

        let ctx = Context::from_settings("/m/in.m4v", "/m/out.mkv", &settings).unwrap();

        assert_eq!(ctx.tools.mkvmerge, PathBuf::from("/opt/mkvmerge"));
        assert_eq!(ctx.tools.ffprobe, PathBuf::from("ffprobe"));
        assert!(ctx.global_overrides.removes("purchase_date"));
        assert!(ctx.track_overrides.removes("creation_time"));
        assert_eq!(ctx.job_name(), "in.m4v");
    }

    #[test]
    fn context_rejects_bad_override_json() {
        let mut settings = Settings::default();
        settings.overrides.track_tags = "[]".to_string();
        assert!(Context::from_settings("in", "out", &settings).is_err());
    }

    #[test]
    fn retained_excludes_deleted() {
        let outcome = RunOutcome {
            exit_code: 0,
            temp_files: vec![PathBuf::from("a"), PathBuf::from("b")],
            deleted: vec![PathBuf::from("a")],
        };
        let retained: Vec<_> = outcome.retained().collect();
        assert_eq!(retained, [Path::new("b")]);
        assert!(outcome.success());
    }
}
