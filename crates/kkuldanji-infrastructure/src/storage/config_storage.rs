//! config.toml storage.
//!
//! A missing or empty file loads as the defaults. Saves go through a
//! temporary file and an atomic rename.

use kkuldanji_core::config::AppConfig;
use kkuldanji_core::error::{HandoverError, Result};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns `HandoverError::Config` when the file exists but is not valid
    /// TOML for `AppConfig`.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] {} not found, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            HandoverError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }

    /// Writes `config` atomically, creating the parent directory if needed.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(config)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Writes the defaults if no config file exists yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        tracing::info!("[Config] Writing default config to {}", self.path.display());
        self.save(&AppConfig::default())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| HandoverError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| HandoverError::io("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}
