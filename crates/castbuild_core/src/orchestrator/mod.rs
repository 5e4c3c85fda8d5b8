//! Pipeline orchestrator for batch demo recording.
//!
//! This module provides the infrastructure for running the per-job
//! recording pipeline and fanning jobs out across a worker pool.
//!
//! # Architecture
//!
//! ```text
//! BatchRunner (rayon worker pool)
//!     └── per job: Pipeline
//!             ├── Step: Record   (asciinema-automation)
//!             └── Step: Convert  (agg)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use castbuild_core::orchestrator::{BatchRunner, BatchSummary};
//!
//! let runner = BatchRunner::new(settings, output_dir, log_dir);
//! let results = runner.run(&jobs, |_| None, None)?;
//! let summary = BatchSummary::from_results(&results);
//! println!("{} of {} jobs succeeded", summary.succeeded, summary.total);
//! ```

mod batch;
mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use batch::{BatchError, BatchRunner, BatchSummary, JobResult};
pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{ConvertStep, RecordStep};
pub use types::{Context, ConvertOutput, JobState, RecordOutput, StepOutcome};
