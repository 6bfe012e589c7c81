//! Configuration and settings management for CropKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Limits (minimum sizes, undo depth)
//! - Page defaults for new compositions
//! - Editing preferences (nudge steps, rotation snapping, border inset)

use cropkit_core::constants::{DEFAULT_BACKGROUND, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use cropkit_core::Limits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsResult};

const CONFIG_DIR_NAME: &str = "cropkit";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Defaults applied to newly created pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDefaults {
    /// Page width in page units
    pub width: f64,
    /// Page height in page units
    pub height: f64,
    /// CSS color string for the page background
    pub background_color: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Direct-manipulation preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Arrow-key nudge distance in page units
    pub nudge_step: f64,
    /// Nudge distance with the modifier held
    pub nudge_step_large: f64,
    /// Inset used for the inner line of double borders, in shape percent units
    pub double_border_inset: f64,
    /// Snap rotate gestures to multiples of this angle; 0 disables snapping
    pub rotation_snap_degrees: f64,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            double_border_inset: 4.0,
            rotation_snap_degrees: 0.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
    pub page: PageDefaults,
    pub editing: EditingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the user config file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no user config directory".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from the default path, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(reason) = self.limits.check() {
            return Err(ConfigError::InvalidLimits(reason));
        }

        if !(self.page.width >= self.limits.min_canvas_size) {
            return Err(out_of_range("page.width", self.page.width));
        }
        if !(self.page.height >= self.limits.min_canvas_size) {
            return Err(out_of_range("page.height", self.page.height));
        }

        if !(self.editing.nudge_step > 0.0) {
            return Err(out_of_range("editing.nudge_step", self.editing.nudge_step));
        }
        if !(self.editing.nudge_step_large > 0.0) {
            return Err(out_of_range(
                "editing.nudge_step_large",
                self.editing.nudge_step_large,
            ));
        }
        if !(0.0..50.0).contains(&self.editing.double_border_inset) {
            return Err(out_of_range(
                "editing.double_border_inset",
                self.editing.double_border_inset,
            ));
        }
        if !(0.0..=180.0).contains(&self.editing.rotation_snap_degrees) {
            return Err(out_of_range(
                "editing.rotation_snap_degrees",
                self.editing.rotation_snap_degrees,
            ));
        }

        Ok(())
    }
}

fn out_of_range(key: &str, value: f64) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
