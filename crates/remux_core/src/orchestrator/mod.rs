//! Pipeline orchestrator for a remux run.
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Probe       ffprobe → container tags + streams
//!     ├── Step: GlobalTags  <input>.global_tags.xml
//!     ├── Step: Tracks      <input>.sub_N.srt, <file>.<id>.xml
//!     ├── Step: Mux         mkvmerge
//!     └── Step: Cleanup     delete temp files (only if mkvmerge exited 0)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use remux_core::orchestrator::{remux, Context};
//!
//! let ctx = Context::new("movie.m4v", "movie.mkv");
//! let outcome = remux(&ctx).unwrap();
//! std::process::exit(outcome.exit_code);
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{CleanupStep, GlobalTagsStep, MuxStep, ProbeStep, TracksStep};
pub use types::{Context, JobState, MuxOutput, RunOutcome, StepOutcome, ToolPaths};

/// Create the standard pipeline with all steps in the correct order.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(ProbeStep)
        .with_step(GlobalTagsStep)
        .with_step(TracksStep)
        .with_step(MuxStep)
        .with_step(CleanupStep)
}

/// Remux `ctx.input` into `ctx.output`.
///
/// Tool failures before mkvmerge runs are errors. Once mkvmerge has run,
/// its exit code is returned in the outcome whatever it is; temp files are
/// deleted only when it is zero. A failure after mkvmerge (a temp file that
/// cannot be deleted) is [`PipelineError::AfterMerge`], which still carries
/// the exit code and the files that were deleted.
pub fn remux(ctx: &Context) -> PipelineResult<RunOutcome> {
    tracing::info!("Remuxing {} -> {}", ctx.input.display(), ctx.output.display());

    let mut state = JobState::new();
    if let Err(err) = create_standard_pipeline().run(ctx, &mut state) {
        return Err(match (err, &state.mux) {
            (
                PipelineError::StepFailed {
                    job_name,
                    step_name,
                    source,
                },
                Some(mux),
            ) => PipelineError::AfterMerge {
                job_name,
                step_name,
                exit_code: mux.exit_code,
                deleted: state.deleted.clone(),
                source,
            },
            (err, _) => err,
        });
    }

    let mux = state.mux.as_ref().ok_or_else(|| PipelineError::Incomplete {
        job_name: ctx.job_name(),
    })?;

    Ok(RunOutcome {
        exit_code: mux.exit_code,
        temp_files: state.temp_files(),
        deleted: state.deleted.clone(),
    })
}
