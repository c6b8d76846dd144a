//! `Config` struct and its persistence.
//!
//! Covers:
//! - the `Config` struct and its `Default` impl
//! - `load` / `save` (YAML file I/O with atomic write)
//! - path helpers (`config_dir`, `config_path`, `session_path`)
//! - semantic validation

use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the pane layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Thickness of the divider strip between adjacent panes, in pixels
    #[serde(default = "crate::defaults::pane_gap")]
    pub pane_gap: f64,

    /// Width of the area around a divider that starts a resize drag
    #[serde(default = "crate::defaults::divider_hit_width")]
    pub divider_hit_width: f64,

    /// Idle seconds before an active background tab is suspended
    #[serde(default = "crate::defaults::suspend_after_secs")]
    pub suspend_after_secs: u64,

    /// Idle seconds before a suspended tab is destroyed
    #[serde(default = "crate::defaults::destroy_after_secs")]
    pub destroy_after_secs: u64,

    /// Restore workspaces and pane layouts on startup
    #[serde(default = "crate::defaults::bool_true")]
    pub restore_session: bool,

    /// Session file location (defaults to `<config dir>/session.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pane_gap: crate::defaults::pane_gap(),
            divider_hit_width: crate::defaults::divider_hit_width(),
            suspend_after_secs: crate::defaults::suspend_after_secs(),
            destroy_after_secs: crate::defaults::destroy_after_secs(),
            restore_session: true,
            session_file: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Check field values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pane_gap.is_finite() || self.pane_gap < 0.0 {
            return Err(ConfigError::Validation(format!(
                "pane_gap must be a non-negative number, got {}",
                self.pane_gap
            )));
        }
        if !self.divider_hit_width.is_finite() || self.divider_hit_width < self.pane_gap {
            return Err(ConfigError::Validation(format!(
                "divider_hit_width ({}) must be at least pane_gap ({})",
                self.divider_hit_width, self.pane_gap
            )));
        }
        if self.destroy_after_secs < self.suspend_after_secs {
            return Err(ConfigError::Validation(format!(
                "destroy_after_secs ({}) must not be shorter than suspend_after_secs ({})",
                self.destroy_after_secs, self.suspend_after_secs
            )));
        }
        Ok(())
    }

    /// Extra hit area on each side of a divider
    pub fn divider_hit_padding(&self) -> f64 {
        (self.divider_hit_width - self.pane_gap).max(0.0) / 2.0
    }

    pub fn suspend_after(&self) -> Duration {
        Duration::from_secs(self.suspend_after_secs)
    }

    pub fn destroy_after(&self) -> Duration {
        Duration::from_secs(self.destroy_after_secs)
    }

    /// Get the configuration directory (`~/.config/tilepane` on every platform
    /// but Windows, which uses the roaming app-data directory)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("tilepane"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .map(|home| home.join(".config").join("tilepane"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the session file path, honouring `session_file`
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pane_gap, 4.0);
        assert_eq!(config.divider_hit_width, 8.0);
        assert_eq!(config.divider_hit_padding(), 2.0);
        assert_eq!(config.suspend_after(), Duration::from_secs(300));
        assert!(config.restore_session);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml_ng::from_str("pane_gap: 6\nlog_level: debug\n").unwrap();
        assert_eq!(config.pane_gap, 6.0);
        assert_eq!(config.divider_hit_width, 8.0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = Config {
            pane_gap: 2.0,
            session_file: Some(PathBuf::from("/tmp/custom-session.json")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.session_path(),
            PathBuf::from("/tmp/custom-session.json")
        );
    }

    #[test]
    fn test_empty_file_loads_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "   \n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "pane_gap: [[[").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let negative_gap = Config {
            pane_gap: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            negative_gap.validate(),
            Err(ConfigError::Validation(_))
        ));

        let narrow_hit = Config {
            divider_hit_width: 2.0,
            ..Config::default()
        };
        assert!(narrow_hit.validate().is_err());

        let inverted_sweep = Config {
            suspend_after_secs: 100,
            destroy_after_secs: 10,
            ..Config::default()
        };
        assert!(inverted_sweep.validate().is_err());
    }
}
