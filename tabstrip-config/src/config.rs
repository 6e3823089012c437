//! `TabsConfig` struct, YAML persistence and path resolution.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - `load_from` / `save_to` for explicit paths (used by tests and hosts
//!   that keep their own config directory)
//! - XDG-style path helpers (`config_path`, `config_dir`)

use crate::defaults;
use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Behavioural settings for the tab manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsConfig {
    /// Maximum number of history entries kept per slot.
    #[serde(default = "defaults::history_limit")]
    pub history_limit: usize,

    /// Emit a `tab_opened` analytics event from `open_current`.
    #[serde(default = "defaults::analytics_enabled")]
    pub analytics_enabled: bool,

    /// When false, normal opens always create a new slot (like `open_new`).
    #[serde(default = "defaults::replace_in_place")]
    pub replace_in_place: bool,

    /// Whether next/previous selection wraps around the ends of the strip.
    #[serde(default = "defaults::wrap_navigation")]
    pub wrap_navigation: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            history_limit: defaults::history_limit(),
            analytics_enabled: defaults::analytics_enabled(),
            replace_in_place: defaults::replace_in_place(),
            wrap_navigation: defaults::wrap_navigation(),
        }
    }
}

impl TabsConfig {
    /// Load configuration from the default path, creating it if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Tabs config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Tabs config not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default tabs config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: TabsConfig = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        log::debug!("Loaded tabs config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Validation(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("tabs.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tabstrip")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tabstrip")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
