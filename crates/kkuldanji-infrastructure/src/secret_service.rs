//! Secret service implementation.
//!
//! Reads secret.json once and caches the result. The `GEMINI_API_KEY`
//! environment variable, when set and non-blank, overrides the file's key.

use crate::paths::KkuldanjiPaths;
use crate::storage::SecretStorage;
use kkuldanji_core::config::{GeminiConfig, SecretConfig};
use kkuldanji_core::error::Result;
use kkuldanji_core::secret::SecretService;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: Arc<SecretStorage>,
    env_api_key: Option<String>,
    /// Cached secret config, filled on first load.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Uses `<config_dir>/secret.json` and the process environment.
    pub fn new(paths: &KkuldanjiPaths) -> Self {
        Self::with_env_key(
            SecretStorage::with_path(paths.secret_file()),
            std::env::var(GEMINI_API_KEY_ENV).ok(),
        )
    }

    pub fn with_env_key(storage: SecretStorage, env_api_key: Option<String>) -> Self {
        Self {
            storage: Arc::new(storage),
            env_api_key: env_api_key.filter(|key| !key.trim().is_empty()),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    fn load_uncached(&self) -> Result<SecretConfig> {
        let mut config = if self.storage.exists() {
            self.storage.load()?
        } else {
            tracing::debug!(
                "[Secret] {} not found, relying on environment",
                self.storage.path().display()
            );
            SecretConfig::default()
        };

        if let Some(key) = &self.env_api_key {
            tracing::debug!("[Secret] Using {} from environment", GEMINI_API_KEY_ENV);
            let model_name = config.gemini.take().and_then(|gemini| gemini.model_name);
            config.gemini = Some(GeminiConfig {
                api_key: key.trim().to_string(),
                model_name,
            });
        }

        Ok(config)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.load_uncached()?;
        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.exists()
    }
}
