//! KnitKit Settings Crate
//!
//! Handles user configuration: default gauge, size, output and logging.

pub mod config;
pub mod error;

pub use config::{
    Config, GaugeSettings, GenerationSettings, LoggingSettings, OutputFormat, OutputSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
