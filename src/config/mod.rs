//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the scan root
pub const CONFIG_FILE: &str = "upshift.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Directory names excluded from every walk, on top of the built-in
    /// defaults (venv, .venv, __pycache__)
    #[serde(default)]
    pub scan_exclude: Vec<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory, looking for upshift.toml
    ///
    /// A missing file is not an error; defaults apply.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Self::from_file(&path);
        }

        Ok(Self::with_defaults())
    }

    /// Create a config with default settings
    pub fn with_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_dir(dir.path()).unwrap();
        assert!(config.settings.scan_exclude.is_empty());
    }

    #[test]
    fn test_parses_scan_excludes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[settings]\nscan_exclude = [\"node_modules\", \"vendor\"]\n",
        )
        .unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.settings.scan_exclude, vec!["node_modules", "vendor"]);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert!(config.settings.scan_exclude.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[settings\nbroken").unwrap();

        assert!(Config::from_dir(dir.path()).is_err());
    }
}
