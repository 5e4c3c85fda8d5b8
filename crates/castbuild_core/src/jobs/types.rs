//! Job types and resolution from config entries.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while resolving job entries.
#[derive(Error, Debug)]
pub enum JobError {
    /// Entry has no usable identifier.
    #[error("Job for script '{0}' has no id and none can be derived from the script name")]
    MissingId(PathBuf),

    /// Two entries resolved to the same identifier.
    #[error("Duplicate job id: {0}")]
    DuplicateId(String),
}

/// Raw job entry as written in the config file.
///
/// The `id` is optional; when omitted it is derived from the script's
/// file stem during resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEntry {
    /// Explicit job identifier (used for output filenames).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Path to the automation driver script.
    pub script: PathBuf,
    /// Path to the source file the recorded editor session opens.
    pub source: PathBuf,
}

impl JobEntry {
    /// Create an entry with an explicit id.
    pub fn new(
        id: impl Into<String>,
        script: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            script: script.into(),
            source: source.into(),
        }
    }
}

/// A resolved recording job.
///
/// One job drives a single record-and-convert unit of work. The id names
/// both output files under the shared output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Automation driver script fed to the recorder.
    pub script: PathBuf,
    /// Source file opened by the recorded editor command.
    pub source: PathBuf,
}

impl Job {
    /// Create a job with an explicit id.
    pub fn new(
        id: impl Into<String>,
        script: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            script: script.into(),
            source: source.into(),
        }
    }

    /// Filename of the raw recording this job produces.
    pub fn recording_filename(&self) -> String {
        format!("{}.cast", self.id)
    }

    /// Filename of the animated artifact this job produces.
    pub fn artifact_filename(&self) -> String {
        format!("{}.gif", self.id)
    }
}

/// Resolve raw config entries into jobs with unique identifiers.
///
/// Ids default to the script's file stem. Empty and duplicate ids are
/// rejected so jobs can never write over each other's output files.
pub fn resolve_jobs(entries: &[JobEntry]) -> Result<Vec<Job>, JobError> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(entries.len());

    for entry in entries {
        let id = match &entry.id {
            Some(id) => id.trim().to_string(),
            None => entry
                .script
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
        };

        if id.is_empty() {
            return Err(JobError::MissingId(entry.script.clone()));
        }
        if !seen.insert(id.clone()) {
            return Err(JobError::DuplicateId(id));
        }

        jobs.push(Job::new(id, entry.script.clone(), entry.source.clone()));
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_defaults_to_script_stem() {
        let entries = [JobEntry {
            id: None,
            script: PathBuf::from("demos/forloop.sh"),
            source: PathBuf::from("testdata/forobj.jsonnet"),
        }];

        let jobs = resolve_jobs(&entries).unwrap();
        assert_eq!(jobs[0].id, "forloop");
    }

    #[test]
    fn explicit_id_wins_over_stem() {
        let entries = [JobEntry::new("rename-demo", "demos/rename.sh", "a.jsonnet")];

        let jobs = resolve_jobs(&entries).unwrap();
        assert_eq!(jobs[0].id, "rename-demo");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let entries = [
            JobEntry::new("demo", "demos/a.sh", "a.jsonnet"),
            JobEntry::new("demo", "demos/b.sh", "b.jsonnet"),
        ];

        let err = resolve_jobs(&entries).unwrap_err();
        assert!(matches!(err, JobError::DuplicateId(id) if id == "demo"));
    }

    #[test]
    fn empty_id_rejected() {
        let entries = [JobEntry {
            id: Some("  ".to_string()),
            script: PathBuf::from("demos/a.sh"),
            source: PathBuf::from("a.jsonnet"),
        }];

        assert!(matches!(
            resolve_jobs(&entries),
            Err(JobError::MissingId(_))
        ));
    }

    #[test]
    fn output_filenames_follow_id() {
        let job = Job::new("forloop", "demos/forloop.sh", "forobj.jsonnet");
        assert_eq!(job.recording_filename(), "forloop.cast");
        assert_eq!(job.artifact_filename(), "forloop.gif");
    }

    #[test]
    fn job_entry_roundtrips_through_toml() {
        let entry = JobEntry::new("demo", "demos/demo.sh", "demo.jsonnet");
        let toml = toml::to_string(&entry).unwrap();
        let back: JobEntry = toml::from_str(&toml).unwrap();
        assert_eq!(back.id.as_deref(), Some("demo"));
        assert_eq!(back.script, PathBuf::from("demos/demo.sh"));
    }
}
