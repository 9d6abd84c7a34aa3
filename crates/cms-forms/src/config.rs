//! Engine configuration
//!
//! Read from `~/.cms-forms/config.toml` unless another path is given.
//! Every key is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Directory of the JSON form store
    pub data_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Keep operator-typed field names across later label edits
    pub preserve_field_name_overrides: bool,
    /// Refuse to save forms whose options collapse to the same value
    pub reject_duplicate_option_values: bool,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            data_dir: base_dir().join("forms"),
            log_level: "info".to_string(),
            preserve_field_name_overrides: false,
            reject_duplicate_option_values: false,
        }
    }
}

impl FormsConfig {
    /// Load from `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cms-forms").join("config.toml"))
    }
}

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cms-forms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormsConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, FormsConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(!config.preserve_field_name_overrides);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reject_duplicate_option_values = true\ndata_dir = \"/srv/forms\"\n").unwrap();

        let config = FormsConfig::load(Some(&path)).unwrap();
        assert!(config.reject_duplicate_option_values);
        assert_eq!(config.data_dir, PathBuf::from("/srv/forms"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = FormsConfig {
            log_level: "debug".into(),
            preserve_field_name_overrides: true,
            ..FormsConfig::default()
        };
        config.save(Some(&path)).unwrap();
        assert_eq!(FormsConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(FormsConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
    }
}
