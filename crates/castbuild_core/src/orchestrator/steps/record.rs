//! Record step - captures the scripted terminal session.

use std::path::PathBuf;

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, RecordOutput, StepOutcome};
use crate::recorder::{record_args, record_session, RecorderError, RECORDER_TOOL};

/// Record step driving asciinema-automation.
///
/// Runs the automation driver script in a recorded session that opens
/// the job's source file in the configured editor.
pub struct RecordStep {
    /// Path to the recorder executable (None = find in PATH).
    recorder_path: Option<PathBuf>,
}

impl RecordStep {
    pub fn new() -> Self {
        Self {
            recorder_path: None,
        }
    }

    /// Set a custom path to the recorder executable.
    pub fn with_recorder_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recorder_path = Some(path.into());
        self
    }

    /// Get the recorder executable path/command.
    fn recorder_cmd(&self) -> &str {
        self.recorder_path
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or(RECORDER_TOOL)
    }
}

impl Default for RecordStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for RecordStep {
    fn name(&self) -> &str {
        "Record"
    }

    fn description(&self) -> &str {
        "Record the scripted terminal session"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.job.script.exists() {
            return Err(StepError::file_not_found(
                ctx.job.script.display().to_string(),
            ));
        }
        if !ctx.job.source.exists() {
            return Err(StepError::file_not_found(
                ctx.job.source.display().to_string(),
            ));
        }

        // Check output directory is writable (create is idempotent)
        if let Err(e) = std::fs::create_dir_all(&ctx.output_dir) {
            return Err(StepError::io_error("creating output directory", e));
        }

        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let recorder = self.recorder_cmd();
        let recording = ctx.recording_path();

        let args = record_args(
            &ctx.job.script,
            &ctx.job.source,
            &recording,
            &ctx.settings.recording,
        );
        let command = format!("{} {}", recorder, args.join(" "));
        ctx.logger.command(&command);

        let output = match record_session(
            recorder,
            &ctx.job.script,
            &ctx.job.source,
            &recording,
            &ctx.settings.recording,
        ) {
            Ok(output) => output,
            Err(RecorderError::CommandFailed {
                tool,
                exit_code,
                message,
            }) => {
                for line in message.lines() {
                    ctx.logger.output_line(line, true);
                }
                ctx.logger.show_tail("recorder output");
                return Err(StepError::command_failed(tool, exit_code, message));
            }
            Err(e) => return Err(e.into()),
        };

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            ctx.logger.output_line(line, false);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            ctx.logger.output_line(line, true);
        }

        state.record = Some(RecordOutput {
            recording_path: recording.clone(),
            exit_code: output.status.code().unwrap_or_default(),
            command,
        });

        ctx.logger
            .success(&format!("Captured {}", recording.display()));

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let record = state
            .record
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Recording results not recorded"))?;

        if !record.recording_path.exists() {
            return Err(StepError::invalid_output(format!(
                "Recording file not created: {}",
                record.recording_path.display()
            )));
        }

        Ok(())
    }
}
