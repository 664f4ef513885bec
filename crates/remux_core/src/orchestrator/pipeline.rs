//! Pipeline runner that executes steps in sequence.

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// Steps run strictly one after another; the first error stops the run.
/// There is no retry and no rollback.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

/// Which steps ran and which were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRunResult {
    pub steps_completed: Vec<String>,
    pub steps_skipped: Vec<String>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Run the pipeline with the given context and state.
    ///
    /// For each step: `validate_input`, `execute`, then `validate_output`
    /// if the step was not skipped.
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<PipelineRunResult> {
        let job_name = ctx.job_name();
        let mut result = PipelineRunResult::default();

        for step in &self.steps {
            let step_name = step.name();
            tracing::info!("=== {} ===", step.description());

            tracing::debug!("Validating input for '{}'", step_name);
            if let Err(e) = step.validate_input(ctx) {
                tracing::error!("Input validation failed: {}", e);
                return Err(PipelineError::step_failed(&job_name, step_name, e));
            }

            tracing::debug!("Executing '{}'", step_name);
            let outcome = step.execute(ctx, state).map_err(|e| {
                tracing::error!("Execution failed: {}", e);
                PipelineError::step_failed(&job_name, step_name, e)
            })?;

            match outcome {
                StepOutcome::Success => {
                    tracing::debug!("Validating output for '{}'", step_name);
                    if let Err(e) = step.validate_output(ctx, state) {
                        tracing::error!("Output validation failed: {}", e);
                        return Err(PipelineError::step_failed(&job_name, step_name, e));
                    }
                    result.steps_completed.push(step_name.to_string());
                }
                StepOutcome::Skipped(reason) => {
                    tracing::info!("{} skipped: {}", step_name, reason);
                    result.steps_skipped.push(step_name.to_string());
                }
            }
        }

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
