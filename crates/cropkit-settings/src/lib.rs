//! CropKit Settings Crate
//!
//! Handles engine configuration: limits, page defaults and editing
//! preferences, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, EditingSettings, PageDefaults};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
