//! Cleanup step - deletes temporary files after a successful merge.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};

pub struct CleanupStep;

impl PipelineStep for CleanupStep {
    fn name(&self) -> &str {
        "Cleanup"
    }

    fn description(&self) -> &str {
        "Delete temporary files"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, _ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let mux = state
            .mux
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("mkvmerge has not run"))?;

        if !mux.success() {
            return Ok(StepOutcome::Skipped(format!(
                "mkvmerge exited with code {}",
                mux.exit_code
            )));
        }

        let files = state.temp_files();
        tracing::info!("Everything OK, deleting temp files: {:?}", files);

        // Keep going past a failed deletion so one stuck file does not
        // strand the rest; the first failure is reported.
        let mut first_error = None;
        for file in files {
            match std::fs::remove_file(&file) {
                Ok(()) => state.deleted.push(file),
                Err(e) => {
                    tracing::warn!("Failed to delete {}: {}", file.display(), e);
                    if first_error.is_none() {
                        first_error =
                            Some(StepError::io_error(format!("deleting {}", file.display()), e));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(StepOutcome::Success),
        }
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if let Some(left) = state.deleted.iter().find(|f| f.exists()) {
            return Err(StepError::invalid_output(format!(
                "Temporary file still present: {}",
                left.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::types::MuxOutput;

    fn state_with_files(dir: &std::path::Path, exit_code: i32) -> JobState {
        let mut state = JobState::new();
        let global = dir.join("in.global_tags.xml");
        let subs = dir.join("in.sub_2.srt");
        std::fs::write(&global, "").unwrap();
        std::fs::write(&subs, "").unwrap();
        std::fs::write(dir.join("in.sub_2.srt.0.xml"), "").unwrap();
        state.global_tags_path = Some(global);
        state.subtitle_files.push(subs.clone());
        state.collection.record(&subs, 0, None);
        state.mux = Some(MuxOutput {
            exit_code,
            command: Vec::new(),
        });
        state
    }

    #[test]
    fn deletes_everything_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new("in", "out.mkv");
        let mut state = state_with_files(dir.path(), 0);

        let outcome = CleanupStep.execute(&ctx, &mut state).unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(state.deleted.len(), 3);
        CleanupStep.validate_output(&ctx, &state).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn keeps_everything_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new("in", "out.mkv");
        let mut state = state_with_files(dir.path(), 2);

        let outcome = CleanupStep.execute(&ctx, &mut state).unwrap();

        assert!(matches!(outcome, StepOutcome::Skipped(_)));
        assert!(state.deleted.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn missing_temp_file_does_not_stop_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new("in", "out.mkv");
        let mut state = state_with_files(dir.path(), 0);
        std::fs::remove_file(dir.path().join("in.sub_2.srt")).unwrap();

        let err = CleanupStep.execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::IoError { .. }));
        assert!(err.to_string().contains("in.sub_2.srt"));
        assert_eq!(
            state.deleted,
            [
                dir.path().join("in.global_tags.xml"),
                dir.path().join("in.sub_2.srt.0.xml"),
            ]
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
