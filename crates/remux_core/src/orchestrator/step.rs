//! Pipeline step trait definition.

use super::errors::StepResult;
use super::types::{Context, JobState, StepOutcome};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output (only
///    when `execute` returned `Success`)
pub trait PipelineStep {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    fn validate_input(&self, ctx: &Context) -> StepResult<()>;

    /// Execute the step's main work, recording results in `state`.
    ///
    /// Returns `StepOutcome::Skipped` if the step determined it should not
    /// run (not an error).
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome>;

    /// Validate outputs after execution.
    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
