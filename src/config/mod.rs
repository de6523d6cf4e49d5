//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ApiSettings, GameSettings, StorageSettings};

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "PEARL_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub game: GameSettings,

    #[serde(default)]
    pub storage: StorageSettings,
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

    /// Apply environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.api.base_url = url.to_string();
            }
        }
        self
    }

    /// State database path, honouring the storage override
    pub fn db_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("pearl.db"))
    }

    pub fn life_regen_interval(&self) -> Duration {
        Duration::from_secs(self.game.life_regen_minutes.max(1) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.game.life_regen_minutes, 30);
        assert!(config.api.sync_enabled);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://pearl.example"

            [game]
            life_regen_minutes = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://pearl.example");
        assert_eq!(config.api.connect_timeout_secs, 5);
        assert_eq!(config.life_regen_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub/config.toml");

        let mut config = Config::default();
        config.storage.db_path = Some(dir.path().join("state.db"));
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.db_path(), dir.path().join("state.db"));
    }
}
