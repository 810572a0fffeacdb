//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub log_level: String,
    /// Path to the atvremote executable; tilde-expanded
    pub atvremote_path: String,
    /// How long a network scan is allowed to run
    pub scan_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteSettings {
                log_level: "info".to_string(),
                atvremote_path: "atvremote".to_string(),
                scan_timeout_secs: 5,
            },
        }
    }
}

impl Config {
    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("tvremote").join("config.toml")
        } else {
            PathBuf::from(".config/tvremote/config.toml")
        }
    }

    /// Load configuration from an explicit path or the default location
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(Self::default_path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from the default location, falling back to built-in defaults
    pub fn load_or_default() -> Self {
        Self::load(None).unwrap_or_default()
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// The atvremote executable path with tilde expansion applied
    pub fn atvremote_path(&self) -> String {
        shellexpand::tilde(&self.remote.atvremote_path).into_owned()
    }

    /// Scan timeout as a duration
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.scan_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.remote.log_level, "info");
        assert_eq!(config.remote.atvremote_path, "atvremote");
        assert_eq!(config.scan_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("Failed to parse");
        assert_eq!(config.remote.log_level, parsed.remote.log_level);
        assert_eq!(config.remote.scan_timeout_secs, parsed.remote.scan_timeout_secs);
    }

    #[test]
    fn test_custom_values() {
        let toml_content = r#"
[remote]
log_level = "debug"
atvremote_path = "~/venv/bin/atvremote"
scan_timeout_secs = 12
"#;
        let config: Config = toml::from_str(toml_content).expect("Failed to parse");
        assert_eq!(config.remote.log_level, "debug");
        assert_eq!(config.scan_timeout(), Duration::from_secs(12));
        // Tilde is expanded when the path is resolved
        assert!(!config.atvremote_path().starts_with('~'));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.remote.scan_timeout_secs = 9;
        config.save(&path).expect("Failed to save");

        let loaded = Config::load(Some(path)).expect("Failed to load");
        assert_eq!(loaded.remote.scan_timeout_secs, 9);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("does-not-exist.toml");
        assert!(Config::load(Some(path)).is_err());
    }
}
