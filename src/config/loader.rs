use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/nearby/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("nearby").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The fix span is within (0, 180] degrees
    /// - The demo position is a valid coordinate
    /// - At least one place is configured, all with valid coordinates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let span = self.map.fix_span_degrees;
        if !(span > 0.0 && span <= 180.0) {
            return Err(ConfigError::ValidationError {
                message: format!("map.fix_span_degrees must be in (0, 180], got {}", span),
            });
        }

        if !self.demo.position().is_valid() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "demo position ({}, {}) is out of range",
                    self.demo.latitude, self.demo.longitude
                ),
            });
        }

        if self.places.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one place must be configured".to_string(),
            });
        }

        if let Some(bad) = self.places.iter().find(|p| !p.coordinate().is_valid()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Place '{}' has out of range coordinates ({}, {})",
                    bad.name, bad.latitude, bad.longitude
                ),
            });
        }

        Ok(())
    }
}
