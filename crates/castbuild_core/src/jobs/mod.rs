//! Job model and resolution.
//!
//! Recording targets arrive as `[[jobs]]` entries in the config file and
//! resolve to `Job`s with guaranteed-unique identifiers. Targets are data
//! handed to the batch runner, not constants compiled into it.

mod types;

pub use types::{resolve_jobs, Job, JobEntry, JobError};
