//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

const CONFIG_HEADER: &str = "# PEARL configuration\n# Every key is optional; missing keys fall back to defaults.\n";

fn open_truncated(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

impl Config {
    /// Get the global config directory path (~/.pearl/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pearl")
    }

    /// Get the global config file path (~/.pearl/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Write the config as TOML to `path`
    ///
    /// Runs of `pearl config init` in two terminals serialize on
    /// `config.toml.lock`. The new content lands in `config.toml.tmp` first
    /// and replaces the old file in one rename, so readers only ever see a
    /// complete config.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let content = format!("{CONFIG_HEADER}\n{body}");

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let lock_path = path.with_extension("toml.lock");
        let lock = open_truncated(&lock_path)?;
        lock.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

        let staged = path.with_extension("toml.tmp");
        let mut file = open_truncated(&staged)?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.sync_all())
            .with_context(|| format!("Failed to write {}", staged.display()))?;
        drop(file);

        std::fs::rename(&staged, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load `path`, or the global config when `None`
    ///
    /// A missing global config is created with defaults. An explicit path
    /// must exist. Environment overrides are applied last.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        Ok(config.with_env_overrides())
    }

    /// Load global configuration from ~/.pearl/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            if let Err(e) = Self::init_at(&global_path, false) {
                // read-only home: run with defaults rather than refuse
                tracing::warn!("Failed to create default config: {}", e);
                return Ok(Self::default());
            }
        }

        Self::from_file(&global_path)
    }

    /// Write a default config to `path`
    ///
    /// Returns `false` without touching the file when it already exists and
    /// `force` is not set.
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        Self::default().save_to_file(path)?;
        tracing::info!("Created {}", path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_does_not_clobber() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(Config::init_at(&path, false).unwrap());
        std::fs::write(&path, "[game]\nlife_regen_minutes = 1\n").unwrap();

        assert!(!Config::init_at(&path, false).unwrap());
        assert_eq!(Config::from_file(&path).unwrap().game.life_regen_minutes, 1);

        assert!(Config::init_at(&path, true).unwrap());
        assert_eq!(Config::from_file(&path).unwrap().game.life_regen_minutes, 30);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_save_replaces_file_atomically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://pearl.example.com".to_string();
        config.save_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(CONFIG_HEADER));
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
