//! Convert step - turns the captured cast into an animated GIF.

use std::path::PathBuf;

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, ConvertOutput, JobState, StepOutcome};
use crate::recorder::{convert_args, convert_recording, RecorderError, CONVERTER_TOOL};

/// Convert step driving agg.
///
/// Reads the recording path from the job state written by the record
/// step, so each conversion is paired with the recording produced by
/// the same job.
pub struct ConvertStep {
    /// Path to the converter executable (None = find in PATH).
    converter_path: Option<PathBuf>,
}

impl ConvertStep {
    pub fn new() -> Self {
        Self {
            converter_path: None,
        }
    }

    /// Set a custom path to the converter executable.
    pub fn with_converter_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.converter_path = Some(path.into());
        self
    }

    /// Get the converter executable path/command.
    fn converter_cmd(&self) -> &str {
        self.converter_path
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or(CONVERTER_TOOL)
    }
}

impl Default for ConvertStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ConvertStep {
    fn name(&self) -> &str {
        "Convert"
    }

    fn description(&self) -> &str {
        "Convert the recording into an animated GIF"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.output_dir.exists() {
            return Err(StepError::invalid_input(format!(
                "Output directory missing: {}",
                ctx.output_dir.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let record = state
            .record
            .as_ref()
            .ok_or_else(|| StepError::invalid_input("No recording captured for this job"))?;

        let converter = self.converter_cmd();
        let recording = record.recording_path.clone();
        let artifact = ctx.artifact_path();

        let args = convert_args(&recording, &artifact, &ctx.settings.conversion);
        let command = format!("{} {}", converter, args.join(" "));
        ctx.logger.command(&command);

        let output = match convert_recording(
            converter,
            &recording,
            &artifact,
            &ctx.settings.conversion,
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
                ctx.logger.show_tail("converter output");
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

        state.convert = Some(ConvertOutput {
            artifact_path: artifact.clone(),
            exit_code: output.status.code().unwrap_or_default(),
            command,
        });

        ctx.logger
            .success(&format!("Artifact: {}", artifact.display()));

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let convert = state
            .convert
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Conversion results not recorded"))?;

        if !convert.artifact_path.exists() {
            return Err(StepError::invalid_output(format!(
                "Artifact not created: {}",
                convert.artifact_path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::jobs::Job;
    use crate::logging::{JobLogger, LogConfig};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn convert_step_has_correct_name() {
        let step = ConvertStep::new();
        assert_eq!(step.name(), "Convert");
    }

    #[test]
    fn convert_step_with_custom_path() {
        let step = ConvertStep::new().with_converter_path("/usr/bin/agg");
        assert_eq!(step.converter_cmd(), "/usr/bin/agg");
    }

    #[test]
    fn convert_without_recording_fails() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("out");
        std::fs::create_dir_all(&out_dir).unwrap();
        let logger =
            Arc::new(JobLogger::new("test", dir.path(), LogConfig::default(), None).unwrap());
        let ctx = Context::new(
            Job::new("test", dir.path().join("a.sh"), dir.path().join("a.jsonnet")),
            Settings::default(),
            out_dir,
            logger,
        );
        let mut state = JobState::new("test");

        let step = ConvertStep::new();
        assert!(matches!(
            step.execute(&ctx, &mut state),
            Err(StepError::InvalidInput(_))
        ));
    }
}
