//! Low-level agg command wrapper.
//!
//! Converts a finished cast file into an animated GIF.

use std::path::Path;
use std::process::{Command, Output};

use super::types::{RecorderError, RecorderResult};
use crate::config::ConversionSettings;

/// Default executable name for the GIF converter.
pub const CONVERTER_TOOL: &str = "agg";

/// Build the argument vector for a conversion invocation.
///
/// Optional flags come first, then any raw extra arguments, then the
/// recording and artifact paths.
pub fn convert_args(
    recording: &Path,
    artifact: &Path,
    settings: &ConversionSettings,
) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(theme) = &settings.theme {
        args.push("--theme".to_string());
        args.push(theme.clone());
    }
    if let Some(size) = settings.font_size {
        args.push("--font-size".to_string());
        args.push(size.to_string());
    }
    args.extend(settings.extra_args.iter().cloned());

    args.push(recording.display().to_string());
    args.push(artifact.display().to_string());
    args
}

/// Convert one recording into an animated GIF.
///
/// The recording must exist; a nonzero exit becomes an explicit error
/// carrying the tool name, exit code, and captured stderr.
pub fn convert_recording(
    tool: &str,
    recording: &Path,
    artifact: &Path,
    settings: &ConversionSettings,
) -> RecorderResult<Output> {
    if !recording.exists() {
        return Err(RecorderError::RecordingNotFound(recording.to_path_buf()));
    }

    let args = convert_args(recording, artifact, settings);

    tracing::debug!("Running: {} {}", tool, args.join(" "));

    let result = Command::new(tool)
        .args(&args)
        .output()
        .map_err(|e| RecorderError::SpawnFailed {
            tool: tool.to_string(),
            source: e,
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(RecorderError::CommandFailed {
            tool: tool.to_string(),
            exit_code: result.status.code().unwrap_or(-1),
            message: stderr.to_string(),
        });
    }

    Ok(result)
}
