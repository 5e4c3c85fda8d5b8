//! castbuild core - backend logic for the demo recording builder.
//!
//! This crate contains all batch-building logic with zero CLI
//! dependencies: configuration, the job model, wrappers for the external
//! recording tools, and the pipeline that drives them per job.

pub mod config;
pub mod jobs;
pub mod logging;
pub mod orchestrator;
pub mod recorder;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
