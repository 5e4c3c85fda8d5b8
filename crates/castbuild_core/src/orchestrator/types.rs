//! Core types for the recording pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::jobs::Job;
use crate::logging::JobLogger;

/// Read-only context passed to pipeline steps.
///
/// Contains the job, configuration, and shared resources that steps can
/// read but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// The job being processed.
    pub job: Job,
    /// Application settings.
    pub settings: Settings,
    /// Output directory shared by all jobs.
    pub output_dir: PathBuf,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
}

impl Context {
    /// Create a new context for a job.
    pub fn new(job: Job, settings: Settings, output_dir: PathBuf, logger: Arc<JobLogger>) -> Self {
        Self {
            job,
            settings,
            output_dir,
            logger,
        }
    }

    /// Job name used in logs and error context.
    pub fn job_name(&self) -> &str {
        &self.job.id
    }

    /// Path where this job's raw recording is written.
    pub fn recording_path(&self) -> PathBuf {
        self.output_dir.join(self.job.recording_filename())
    }

    /// Path where this job's animated artifact is written.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(self.job.artifact_filename())
    }
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// This is the write-once manifest - steps add new data but do not
/// overwrite existing values. The convert step reads the recording path
/// from here, so the two external calls are paired structurally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// Unique job identifier.
    pub job_id: String,
    /// When the job started.
    pub started_at: Option<String>,
    /// Recording results (from Record step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordOutput>,
    /// Conversion results (from Convert step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert: Option<ConvertOutput>,
}

impl JobState {
    /// Create a new job state with the given ID.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if the recording has been captured.
    pub fn has_recording(&self) -> bool {
        self.record.is_some()
    }

    /// Get the recording path (if the record step completed).
    pub fn recording_path(&self) -> Option<&PathBuf> {
        self.record.as_ref().map(|r| &r.recording_path)
    }
}

/// Output from the Record step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutput {
    /// Path to the captured cast file.
    pub recording_path: PathBuf,
    /// Recorder exit code.
    pub exit_code: i32,
    /// Recorder command that was run.
    pub command: String,
}

/// Output from the Convert step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// Path to the animated artifact.
    pub artifact_path: PathBuf,
    /// Converter exit code.
    pub exit_code: i32,
    /// Converter command that was run.
    pub command: String,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (preconditions not met, but not an error).
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_state_tracks_completion() {
        let mut state = JobState::new("forloop");
        assert!(!state.has_recording());
        assert!(state.recording_path().is_none());

        state.record = Some(RecordOutput {
            recording_path: PathBuf::from("out/forloop.cast"),
            exit_code: 0,
            command: "asciinema-automation ...".to_string(),
        });

        assert!(state.has_recording());
        assert_eq!(
            state.recording_path(),
            Some(&PathBuf::from("out/forloop.cast"))
        );
    }

    #[test]
    fn job_state_serializes() {
        let state = JobState::new("rename");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"job_id\":\"rename\""));
    }
}
