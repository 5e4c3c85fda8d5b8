//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates. The job list is an array of tables in the same file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::jobs::JobEntry;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Session recording settings.
    #[serde(default)]
    pub recording: RecordingSettings,

    /// GIF conversion settings.
    #[serde(default)]
    pub conversion: ConversionSettings,

    /// Recording targets.
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            logging: LoggingSettings::default(),
            recording: RecordingSettings::default(),
            conversion: ConversionSettings::default(),
            jobs: Vec::new(),
        }
    }
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for recordings and artifacts.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for per-job log files and reports.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output_folder() -> String {
    "out".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Use compact log format (tool output buffered, replayed on error).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool-output lines to keep for the error tail.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,

    /// Show timestamps in job log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

/// Session recording settings.
///
/// These feed the recorder invocation and the recorded command template
/// `-c "EDITOR ARGS SOURCE"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    /// Recorder executable (defaults to asciinema-automation on PATH).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<PathBuf>,

    /// Seconds to wait between automation instructions.
    #[serde(default)]
    pub wait: u32,

    /// Standard deviation of simulated typing delays.
    #[serde(default)]
    pub standard_deviation: u32,

    /// Editor binary run inside the recorded session.
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Extra arguments passed to the editor before the source file.
    #[serde(default = "default_editor_args")]
    pub editor_args: Vec<String>,
}

fn default_editor() -> String {
    "nvim".to_string()
}

fn default_editor_args() -> Vec<String> {
    vec!["--cmd".to_string(), "set noswapfile".to_string()]
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            tool: None,
            wait: 0,
            standard_deviation: 0,
            editor: default_editor(),
            editor_args: default_editor_args(),
        }
    }
}

/// GIF conversion settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Converter executable (defaults to agg on PATH).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<PathBuf>,

    /// Color theme passed to the converter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Font size passed to the converter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    /// Additional raw arguments appended before the file paths.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// Identifies a config section for atomic section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Logging,
    Recording,
    Conversion,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Logging => "logging",
            Self::Recording => "recording",
            Self::Conversion => "conversion",
        }
    }
}
