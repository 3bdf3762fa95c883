//! CLI configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/filetree/config.toml`
//! - macOS: `~/Library/Application Support/filetree/config.toml`
//! - Windows: `%APPDATA%\filetree\config.toml`
//!
//! A missing default file yields the defaults; a file named explicitly with
//! `--config` must exist.

use anyhow::{Context, Result};
use ft_core::TreeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "text"
/// log_level = "warn"
///
/// [tree]
/// max_nodes = 4096
/// self_check = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Settings for the tree each command runs against
    #[serde(default)]
    pub tree: TreeConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format (json, text, pretty)
    pub default_format: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: "pretty".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let valid_formats = ["json", "text", "pretty"];
        if !valid_formats.contains(&self.general.default_format.as_str()) {
            anyhow::bail!(
                "invalid default_format '{}', must be one of: {}",
                self.general.default_format,
                valid_formats.join(", ")
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            );
        }

        self.tree
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid [tree] section: {e}"))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if the
    /// file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = get_config_path()?;
                if !default.exists() {
                    debug!("Config file not found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        let config: Self = toml::from_str(&content).context("failed to parse config file")?;
        config.validate()?;

        debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }
}

/// Gets the default configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;

    Ok(config_dir.join("filetree").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.default_format, "pretty");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[general]
default_format = "json"
log_level = "debug"

[tree]
max_nodes = 64
self_check = true
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.general.default_format, "json");
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.tree.max_nodes, Some(64));
        assert!(config.tree.self_check);
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_config("[tree]\nmax_nodes = 8\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.general, GeneralConfig::default());
        assert_eq!(config.tree.max_nodes, Some(8));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let file = write_config("[general]\ndefault_format = \"yaml\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("default_format"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut config = Config::default();
        config.tree.max_nodes = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_nodes"));
    }

    #[test]
    fn test_round_trip_toml() {
        let mut config = Config::default();
        config.tree.max_nodes = Some(10);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Ok(path) = get_config_path() {
            assert!(path.ends_with("filetree/config.toml"));
        }
    }
}
