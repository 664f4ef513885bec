//! remux command line.
//!
//! Usage:
//!   remux [OPTIONS] INPUT OUTPUT
//!
//! The process exits with mkvmerge's exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use clap::Parser;

use remux_core::config::{ConfigManager, Settings};
use remux_core::logging::init_tracing;
use remux_core::orchestrator::PipelineError;
use remux_core::{remux, Context};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source media file
    input: PathBuf,

    /// Matroska file to create
    output: PathBuf,

    /// ffmpeg executable
    #[arg(long, value_name = "PATH")]
    ffmpeg_path: Option<String>,

    /// ffprobe executable
    #[arg(long, value_name = "PATH")]
    ffprobe_path: Option<String>,

    /// mkvmerge executable
    #[arg(long, value_name = "PATH")]
    mkvmerge_path: Option<String>,

    /// JSON object merged into the container tags; null removes a tag
    #[arg(long, value_name = "JSON")]
    override_global_tags: Option<String>,

    /// JSON object merged into every track's tags; null removes a tag
    #[arg(long, value_name = "JSON")]
    override_track_tags: Option<String>,

    /// Extra mkvmerge arguments, split like a shell command line
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    mkvmerge_raw_args: Option<String>,

    /// TOML settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Less logging (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

impl Args {
    /// Settings from `--config` (or defaults) with command line flags on top.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let mut manager = ConfigManager::new(path);
                manager
                    .load()
                    .with_context(|| format!("loading config {}", path.display()))?;
                manager.into_settings()
            }
            None => Settings::default(),
        };

        if let Some(path) = &self.ffmpeg_path {
            settings.tools.ffmpeg = path.clone();
        }
        if let Some(path) = &self.ffprobe_path {
            settings.tools.ffprobe = path.clone();
        }
        if let Some(path) = &self.mkvmerge_path {
            settings.tools.mkvmerge = path.clone();
        }
        if let Some(json) = &self.override_global_tags {
            settings.overrides.global_tags = json.clone();
        }
        if let Some(json) = &self.override_track_tags {
            settings.overrides.track_tags = json.clone();
        }

        Ok(settings)
    }

    fn verbosity(&self) -> i8 {
        let delta = i16::from(self.verbose) - i16::from(self.quiet);
        delta.clamp(i8::MIN as i16, i8::MAX as i16) as i8
    }

    fn raw_args(&self) -> Result<Vec<String>> {
        match &self.mkvmerge_raw_args {
            None => Ok(Vec::new()),
            Some(raw) => match shlex::split(raw) {
                Some(args) => Ok(args),
                None => bail!("--mkvmerge-raw-args: unbalanced quotes in {:?}", raw),
            },
        }
    }
}

/// Map a child exit code to this process's exit status; anything outside
/// 0..=255 (including death by signal) becomes 1.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

/// Exit status for a failed run: mkvmerge's status if it got that far.
fn failure_status(err: &PipelineError) -> Option<u8> {
    err.merge_exit_code().map(exit_status)
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = args.settings()?;
    init_tracing(settings.logging.level.adjusted(args.verbosity()));

    let raw_args = args.raw_args()?;
    let ctx = Context::from_settings(&args.input, &args.output, &settings)
        .context("invalid tag overrides")?
        .with_raw_args(raw_args);

    let outcome = match remux(&ctx) {
        Ok(outcome) => outcome,
        Err(err) => match failure_status(&err) {
            Some(status) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::from(status));
            }
            None => return Err(err.into()),
        },
    };
    if !outcome.success() {
        tracing::error!(
            "mkvmerge exited with {}; kept {} temp file(s)",
            outcome.exit_code,
            outcome.retained().count()
        );
    }

    Ok(ExitCode::from(exit_status(outcome.exit_code)))
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
