//! Batch runner that fans jobs out across a worker pool.
//!
//! Each job runs the standard Record -> Convert pipeline on its own
//! worker. Jobs are independent; the only shared resource is the output
//! directory, which is created once before the pool starts. Failures
//! are isolated per job and collected into results.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;

use crate::config::Settings;
use crate::jobs::Job;
use crate::logging::{JobLogger, LogCallback, LogConfig};

use super::errors::PipelineError;
use super::pipeline::{CancelHandle, Pipeline, PipelineRunResult};
use super::steps::{ConvertStep, RecordStep};
use super::types::{Context, JobState};

/// Errors from batch setup (before any job runs).
#[derive(Error, Debug)]
pub enum BatchError {
    /// A required directory could not be created.
    #[error("Failed to create {what} directory '{path}': {source}")]
    Setup {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker pool could not be built.
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Job ID that was processed.
    pub job_id: String,
    /// Whether the job completed successfully.
    pub success: bool,
    /// Path to the artifact (if successful).
    pub artifact_path: Option<PathBuf>,
    /// Error message (if failed).
    pub error: Option<String>,
    /// Steps that completed.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl JobResult {
    /// Create a successful result.
    pub fn success(
        job_id: impl Into<String>,
        artifact_path: Option<PathBuf>,
        run_result: PipelineRunResult,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            success: true,
            artifact_path,
            error: None,
            steps_completed: run_result.steps_completed,
            steps_skipped: run_result.steps_skipped,
        }
    }

    /// Create a failed result.
    pub fn failure(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            success: false,
            artifact_path: None,
            error: Some(error.into()),
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Total jobs processed.
    pub total: usize,
    /// Jobs that completed successfully.
    pub succeeded: usize,
    /// Jobs that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Build a summary from job results.
    pub fn from_results(results: &[JobResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    /// Whether every job succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runner that processes a job list across a worker pool.
///
/// The pool is sized to the host's available parallelism unless
/// overridden. Each worker blocks synchronously on its job's two
/// subprocess calls; there is no cross-job ordering guarantee.
pub struct BatchRunner {
    /// Application settings.
    settings: Settings,
    /// Output directory shared by all jobs.
    output_dir: PathBuf,
    /// Directory for per-job logs and reports.
    log_dir: PathBuf,
    /// Worker count override.
    workers: Option<usize>,
    /// Recorder executable override.
    recorder_path: Option<PathBuf>,
    /// Converter executable override.
    converter_path: Option<PathBuf>,
}

impl BatchRunner {
    /// Create a new batch runner.
    pub fn new(settings: Settings, output_dir: PathBuf, log_dir: PathBuf) -> Self {
        let recorder_path = settings.recording.tool.clone();
        let converter_path = settings.conversion.tool.clone();
        Self {
            settings,
            output_dir,
            log_dir,
            workers: None,
            recorder_path,
            converter_path,
        }
    }

    /// Override the worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Override the recorder executable.
    pub fn with_recorder_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recorder_path = Some(path.into());
        self
    }

    /// Override the converter executable.
    pub fn with_converter_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.converter_path = Some(path.into());
        self
    }

    /// Effective worker count.
    fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Run all jobs across the worker pool.
    ///
    /// The output and log directories are created once, before the pool
    /// starts. `callback_factory` is invoked per job to create the
    /// console sink for that job's logger. If a cancel handle is given,
    /// jobs that have not started when it fires are failed as cancelled.
    pub fn run<F>(
        &self,
        jobs: &[Job],
        callback_factory: F,
        cancel: Option<&CancelHandle>,
    ) -> Result<Vec<JobResult>, BatchError>
    where
        F: Fn(&str) -> Option<LogCallback> + Sync,
    {
        fs::create_dir_all(&self.output_dir).map_err(|e| BatchError::Setup {
            what: "output",
            path: self.output_dir.clone(),
            source: e,
        })?;
        fs::create_dir_all(&self.log_dir).map_err(|e| BatchError::Setup {
            what: "logs",
            path: self.log_dir.clone(),
            source: e,
        })?;

        if jobs.is_empty() {
            tracing::info!("No jobs to build");
            return Ok(Vec::new());
        }

        let workers = self.worker_count();
        tracing::info!("Building {} job(s) on {} worker(s)", jobs.len(), workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let results = pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    if let Some(handle) = cancel {
                        if handle.is_cancelled() {
                            return JobResult::failure(&job.id, "Cancelled before start");
                        }
                    }

                    tracing::info!("Recording {}...", job.id);
                    self.process_job(job, callback_factory(&job.id))
                })
                .collect()
        });

        Ok(results)
    }

    /// Process a single job through the standard pipeline.
    fn process_job(&self, job: &Job, callback: Option<LogCallback>) -> JobResult {
        let log_config = LogConfig::from_settings(&self.settings.logging);
        let logger = match JobLogger::new(&job.id, &self.log_dir, log_config, callback) {
            Ok(logger) => Arc::new(logger),
            Err(e) => {
                let err = PipelineError::setup_failed(
                    &job.id,
                    format!("Failed to create logger: {}", e),
                );
                return JobResult::failure(&job.id, err.to_string());
            }
        };

        let ctx = Context::new(
            job.clone(),
            self.settings.clone(),
            self.output_dir.clone(),
            logger,
        );
        let mut state = JobState::new(&job.id);
        let pipeline = self.build_pipeline();

        ctx.logger.info(&format!("Starting job: {}", job.id));
        ctx.logger
            .info(&format!("Script: {}", job.script.display()));
        ctx.logger
            .info(&format!("Source: {}", job.source.display()));

        let result = match pipeline.run(&ctx, &mut state) {
            Ok(run_result) => {
                let artifact = state.convert.as_ref().map(|c| c.artifact_path.clone());
                JobResult::success(&job.id, artifact, run_result)
            }
            Err(e) => {
                ctx.logger.error(&format!("Pipeline failed: {}", e));
                JobResult::failure(&job.id, e.to_string())
            }
        };

        self.write_report(&job.id, &state);
        result
    }

    /// Build the standard Record -> Convert pipeline for one job.
    fn build_pipeline(&self) -> Pipeline {
        let mut record = RecordStep::new();
        if let Some(path) = &self.recorder_path {
            record = record.with_recorder_path(path);
        }

        let mut convert = ConvertStep::new();
        if let Some(path) = &self.converter_path {
            convert = convert.with_converter_path(path);
        }

        Pipeline::new().with_step(record).with_step(convert)
    }

    /// Write the job's state manifest next to its log.
    fn write_report(&self, job_id: &str, state: &JobState) {
        let path = self.log_dir.join(format!("{}.report.json", job_id));
        match serde_json::to_string_pretty(state) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    tracing::warn!("Failed to write report {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize report for {}: {}", job_id, e),
        }
    }
}
