//! Configuration management.
//!
//! Settings live in a single TOML file (`castbuild.toml` by default),
//! organized into sections plus a `[[jobs]]` array of recording targets.
//! The manager handles defaults, atomic writes, and section updates.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, ConversionSettings, LoggingSettings, PathSettings, RecordingSettings, Settings,
};
