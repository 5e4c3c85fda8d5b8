//! Error types for external tool invocation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from running the recording or conversion tools.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The automation driver script does not exist.
    #[error("Automation script not found: {0}")]
    ScriptNotFound(PathBuf),

    /// The recording handed to the converter does not exist.
    #[error("Recording not found: {0}")]
    RecordingNotFound(PathBuf),

    /// The tool could not be spawned (missing binary, permissions).
    #[error("Failed to run {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran but exited nonzero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },
}

/// Result type for tool invocations.
pub type RecorderResult<T> = Result<T, RecorderError>;
