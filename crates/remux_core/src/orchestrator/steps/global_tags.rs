//! Global tags step - writes the container-level tag XML.

use crate::mux::global_tags_path;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};
use crate::tags::write_tags_file;

pub struct GlobalTagsStep;

impl PipelineStep for GlobalTagsStep {
    fn name(&self) -> &str {
        "GlobalTags"
    }

    fn description(&self) -> &str {
        "Write global tags"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let probe = state
            .probe
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("source has not been probed"))?;

        // The title is taken as probed, before overrides are applied.
        state.title = probe.title().map(str::to_string);
        match &state.title {
            Some(title) => tracing::info!("Title: {}", title),
            None => tracing::debug!("Source has no title tag"),
        }

        let mut tags = probe.format_tags.clone();
        tags.apply_overrides(&ctx.global_overrides);

        let path = global_tags_path(&ctx.input);
        write_tags_file(&tags, &path)?;
        tracing::info!("Wrote {} global tag(s) to {}", tags.len(), path.display());

        state.global_tags_path = Some(path);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.global_tags_path {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "Global tags not written: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("Global tags path not recorded")),
        }
    }
}
