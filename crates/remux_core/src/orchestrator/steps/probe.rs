//! Probe step - reads container tags and streams with ffprobe.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};
use crate::probe::probe_file;

pub struct ProbeStep;

impl PipelineStep for ProbeStep {
    fn name(&self) -> &str {
        "Probe"
    }

    fn description(&self) -> &str {
        "Probe source with ffprobe"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.input.is_file() {
            return Err(StepError::file_not_found(ctx.input.to_string_lossy()));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let probe = probe_file(&ctx.tools.ffprobe, &ctx.input)?;

        for stream in &probe.streams {
            tracing::debug!(
                "Stream {}: {} ({})",
                stream.index,
                stream.codec_name,
                stream.codec_type
            );
        }

        state.probe = Some(probe);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.probe.is_none() {
            return Err(StepError::invalid_output("Probe result not recorded"));
        }
        Ok(())
    }
}
