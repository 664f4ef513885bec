//! Mux step - merges everything into the output file using mkvmerge.

use crate::io::run_inherited;
use crate::mux::{format_tokens_pretty, MkvmergeOptionsBuilder};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, MuxOutput, StepOutcome};

/// Mux step for merging tracks with mkvmerge.
///
/// A non-zero mkvmerge exit code is recorded, not raised: the run still
/// completes so the caller can report the code, and cleanup is skipped.
pub struct MuxStep;

impl PipelineStep for MuxStep {
    fn name(&self) -> &str {
        "Mux"
    }

    fn description(&self) -> &str {
        "Merge tracks into output file with mkvmerge"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let global_tags = state
            .global_tags_path
            .as_deref()
            .ok_or_else(|| StepError::precondition_failed("global tags have not been written"))?;

        let tokens = MkvmergeOptionsBuilder::new(&ctx.output, global_tags, &state.collection)
            .with_title(state.title.as_deref())
            .with_raw_args(&ctx.raw_args)
            .build();

        tracing::info!("mkvmerge command line: {:?}", tokens);
        if ctx.show_options_pretty {
            tracing::info!(
                "mkvmerge options:\n{} {}",
                ctx.tools.mkvmerge.display(),
                format_tokens_pretty(&tokens)
            );
        }

        let exit_code = run_inherited("mkvmerge", &ctx.tools.mkvmerge, &tokens)?;

        // mkvmerge exit codes: 0 = success, 1 = warnings, 2 = errors
        if exit_code == 0 {
            tracing::info!("Merged to: {}", ctx.output.display());
        } else {
            tracing::warn!(
                "mkvmerge exited with code {}, keeping temporary files for inspection",
                exit_code
            );
        }

        state.mux = Some(MuxOutput {
            exit_code,
            command: tokens,
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.mux.is_none() {
            return Err(StepError::invalid_output("Mux results not recorded"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_global_tags() {
        let ctx = Context::new("in.m4v", "out.mkv");
        let mut state = JobState::new();
        let err = MuxStep.execute(&ctx, &mut state).unwrap_err();
        assert!(matches!(err, StepError::PreconditionFailed(_)));
        assert!(state.mux.is_none());
    }

    #[test]
    fn unrecorded_mux_fails_validation() {
        let ctx = Context::new("in.m4v", "out.mkv");
        let state = JobState::new();
        assert!(MuxStep.validate_output(&ctx, &state).is_err());
    }
}
