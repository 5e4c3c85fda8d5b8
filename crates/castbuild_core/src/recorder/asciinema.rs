//! Low-level asciinema-automation command wrapper.
//!
//! Drives the session recorder against an automation script, capturing
//! the scripted editor session into an asciinema v2 cast file.

use std::path::Path;
use std::process::{Command, Output};

use super::types::{RecorderError, RecorderResult};
use crate::config::RecordingSettings;

/// Default executable name for the session recorder.
pub const RECORDER_TOOL: &str = "asciinema-automation";

/// Build the argument vector for a recording invocation.
///
/// The recorded command template opens the job's source file in the
/// configured editor: `-c "EDITOR ARGS SOURCE"`. Editor arguments that
/// contain whitespace are single-quoted so the shell inside the session
/// receives them as one word.
pub fn record_args(
    script: &Path,
    source: &Path,
    output: &Path,
    settings: &RecordingSettings,
) -> Vec<String> {
    let mut inner = settings.editor.clone();
    for arg in &settings.editor_args {
        inner.push(' ');
        inner.push_str(&quote_word(arg));
    }
    inner.push(' ');
    inner.push_str(&source.display().to_string());

    vec![
        "--wait".to_string(),
        settings.wait.to_string(),
        "--standard-deviation".to_string(),
        settings.standard_deviation.to_string(),
        "-d".to_string(),
        script.display().to_string(),
        output.display().to_string(),
        "--asciinema-arguments".to_string(),
        format!("-c \"{}\"", inner),
    ]
}

/// Record one session.
///
/// Runs the recorder against `script`, writing the cast to `output`.
/// The driver script must exist; a nonzero exit becomes an explicit
/// error carrying the tool name, exit code, and captured stderr.
pub fn record_session(
    tool: &str,
    script: &Path,
    source: &Path,
    output: &Path,
    settings: &RecordingSettings,
) -> RecorderResult<Output> {
    if !script.exists() {
        return Err(RecorderError::ScriptNotFound(script.to_path_buf()));
    }

    let args = record_args(script, source, output, settings);

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

/// Single-quote a word when it contains whitespace.
fn quote_word(word: &str) -> String {
    if word.contains(char::is_whitespace) {
        format!("'{}'", word)
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn record_args_match_tool_invocation() {
        let settings = RecordingSettings::default();
        let args = record_args(
            &PathBuf::from("demos/forloop.sh"),
            &PathBuf::from("testdata/forobj.jsonnet"),
            &PathBuf::from("out/forloop.cast"),
            &settings,
        );

        assert_eq!(
            args,
            vec![
                "--wait",
                "0",
                "--standard-deviation",
                "0",
                "-d",
                "demos/forloop.sh",
                "out/forloop.cast",
                "--asciinema-arguments",
                "-c \"nvim --cmd 'set noswapfile' testdata/forobj.jsonnet\"",
            ]
        );
    }

    #[test]
    fn record_args_honor_settings() {
        let settings = RecordingSettings {
            wait: 2,
            standard_deviation: 5,
            editor: "vim".to_string(),
            editor_args: vec![],
            ..RecordingSettings::default()
        };
        let args = record_args(
            &PathBuf::from("d.sh"),
            &PathBuf::from("f.txt"),
            &PathBuf::from("o.cast"),
            &settings,
        );

        assert_eq!(args[1], "2");
        assert_eq!(args[3], "5");
        assert_eq!(args[8], "-c \"vim f.txt\"");
    }

    #[test]
    fn nonexistent_script_error() {
        let result = record_session(
            RECORDER_TOOL,
            Path::new("/nonexistent/script.sh"),
            Path::new("/tmp/source.jsonnet"),
            Path::new("/tmp/out.cast"),
            &RecordingSettings::default(),
        );
        assert!(matches!(result, Err(RecorderError::ScriptNotFound(_))));
    }

    #[test]
    fn quotes_words_with_whitespace_only() {
        assert_eq!(quote_word("set noswapfile"), "'set noswapfile'");
        assert_eq!(quote_word("--cmd"), "--cmd");
    }
}
