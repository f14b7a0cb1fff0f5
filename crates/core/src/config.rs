//! Configuration file loading
//!
//! Settings live in `config.toml` under the platform config directory,
//! unless a path is given explicitly. A missing default file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";

fn default_log_filter() -> String {
    "info".to_string()
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Donor export to read when none is given on the command line
    #[serde(default)]
    pub donors_file: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub directory: DirectorySettings,
}

/// `[directory]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorySettings {
    /// Location filter applied when none is given
    #[serde(default)]
    pub default_location: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            donors_file: None,
            log_filter: default_log_filter(),
            directory: DirectorySettings::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path; the file must exist
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_toml_str(&contents)?;

        // Relative donor paths are relative to the config file
        if let (Some(donors), Some(parent)) = (&config.donors_file, path.as_ref().parent()) {
            if donors.is_relative() {
                config.donors_file = Some(parent.join(donors));
            }
        }

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Load from the platform config directory, falling back to defaults
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from `path` if given, otherwise from the platform config directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_default(),
        }
    }

    /// Platform-specific location of `config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "hemo", "hemo").ok_or_else(|| {
            Error::Config("Could not determine config directory".to_string())
        })?;

        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(Error::Config("log_filter must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "info");
        assert!(config.donors_file.is_none());
        assert!(config.directory.default_location.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            donors_file = "/var/lib/hemo/donors.json"
            log_filter = "hemo_core=debug"

            [directory]
            default_location = "Dhaka"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.donors_file,
            Some(PathBuf::from("/var/lib/hemo/donors.json"))
        );
        assert_eq!(config.log_filter, "hemo_core=debug");
        assert_eq!(config.directory.default_location.as_deref(), Some("Dhaka"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml_str("interval_days = 90");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_empty_log_filter_rejected() {
        let result = Config::from_toml_str("log_filter = \"  \"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_resolves_relative_donor_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "donors_file = \"donors.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.donors_file, Some(dir.path().join("donors.json")));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
