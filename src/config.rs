//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::ZOOM_DIVISORS;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Catalog snapshot used when no path is given on the command line
    pub catalog: Option<PathBuf>,
    /// Override for the visit list directory
    pub data_dir: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Zoom divisor the map view starts at
    #[serde(default = "default_zoom_divisor")]
    pub default_zoom: u32,
}

/// Default zoom divisor (full detail).
fn default_zoom_divisor() -> u32 {
    ZOOM_DIVISORS[0]
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
            default_zoom: default_zoom_divisor(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/hallmap/config.toml`
/// - macOS: `~/Library/Application Support/hallmap/config.toml`
/// - Windows: `%APPDATA%\hallmap\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// UI preferences
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/hallmap/`
    /// - macOS: `~/Library/Application Support/hallmap/`
    /// - Windows: `%APPDATA%\hallmap\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(crate::constants::APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `default_zoom` is one of the supported zoom divisors
    /// - the configured catalog snapshot exists, when set
    pub fn validate(&self) -> Result<()> {
        if !ZOOM_DIVISORS.contains(&self.ui.default_zoom) {
            anyhow::bail!(
                "Invalid default_zoom {}: must be one of {:?}",
                self.ui.default_zoom,
                ZOOM_DIVISORS
            );
        }

        if let Some(catalog) = &self.paths.catalog {
            if !catalog.exists() {
                anyhow::bail!("Configured catalog snapshot not found: {}", catalog.display());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.default_zoom, 1);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert!(config.paths.catalog.is_none());
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let mut config = Config::new();
        config.ui.default_zoom = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_catalog_path_rejected() {
        let mut config = Config::new();
        config.paths.catalog = Some(PathBuf::from("/nonexistent/catalog.json"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        config.ui.default_zoom = 2;
        config.paths.data_dir = Some(PathBuf::from("/tmp/visits"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[paths]\n\n[ui]\nshow_help_on_startup = false\n")
            .unwrap();
        assert!(!parsed.ui.show_help_on_startup);
        assert_eq!(parsed.ui.default_zoom, 1);
    }
}
