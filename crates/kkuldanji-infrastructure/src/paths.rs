//! Unified path management for Kkuldanji configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/kkuldanji/         # Config directory (dirs::config_dir)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── kkuldanji.log.YYYY-MM-DD
//! ```
//!
//! Every path can be rebased onto a custom directory, which is how the CLI
//! `--config-dir` flag and the tests work.

use kkuldanji_core::config::{GeminiConfig, SecretConfig};
use kkuldanji_core::error::{HandoverError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "kkuldanji";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KkuldanjiPaths {
    config_dir: PathBuf,
}

impl KkuldanjiPaths {
    /// Resolves the config directory, preferring `base_path` when given.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let config_dir = match base_path {
            Some(base) => base.to_path_buf(),
            None => dirs::config_dir()
                .ok_or_else(|| HandoverError::config("Cannot find config directory"))?
                .join(APP_DIR_NAME),
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// The template carries an empty Gemini key. On Unix the file is created
    /// with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        tracing::info!("[Paths] Created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}
