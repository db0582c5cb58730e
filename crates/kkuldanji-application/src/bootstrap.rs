//! Wires configuration, secrets and the Gemini assistant into a use case.

use crate::handover_usecase::HandoverUseCase;
use kkuldanji_core::config::AppConfig;
use kkuldanji_core::error::{HandoverError, Result};
use kkuldanji_core::secret::SecretService;
use kkuldanji_infrastructure::{
    ConfigStorage, GEMINI_API_KEY_ENV, KkuldanjiPaths, SecretServiceImpl,
};
use kkuldanji_interaction::GeminiHandoverAssistant;
use std::sync::Arc;

/// Loads `config.toml` and the API key under `paths`, then builds the use case.
///
/// A missing config file is written out with defaults. A missing secret file
/// is created as a template; without a key from the file or the environment
/// this fails with a `Security` error naming the template path.
pub async fn build_usecase(paths: &KkuldanjiPaths) -> Result<(HandoverUseCase, AppConfig)> {
    let config_storage = ConfigStorage::new(paths.config_file());
    config_storage.ensure_exists()?;
    let config = config_storage.load()?;
    tracing::info!(
        "[Bootstrap] Loaded config from {}",
        config_storage.path().display()
    );

    let secret_path = paths.ensure_secret_file()?;
    let secrets = SecretServiceImpl::new(paths).load_secrets().await?;

    let assistant = GeminiHandoverAssistant::from_config(&config, &secrets).map_err(|e| {
        if matches!(e, HandoverError::Security(_)) {
            HandoverError::security(format!(
                "Gemini API key is not set. Add it to {} or set {}",
                secret_path.display(),
                GEMINI_API_KEY_ENV
            ))
        } else {
            e
        }
    })?;

    let usecase = HandoverUseCase::new(Arc::new(assistant), &config);
    Ok((usecase, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_names_template() {
        let dir = TempDir::new().unwrap();
        let paths = KkuldanjiPaths::new(Some(dir.path())).unwrap();

        // The environment may carry a real key; only assert when it doesn't.
        if std::env::var(GEMINI_API_KEY_ENV).is_ok() {
            return;
        }

        let err = build_usecase(&paths).await.err().unwrap();
        assert!(matches!(err, HandoverError::Security(_)));
        assert!(err.to_string().contains("secret.json"));
        assert!(paths.secret_file().exists());
        assert!(paths.config_file().exists());
    }

    #[tokio::test]
    async fn test_builds_with_key_from_file() {
        let dir = TempDir::new().unwrap();
        let paths = KkuldanjiPaths::new(Some(dir.path())).unwrap();
        std::fs::write(
            paths.secret_file(),
            r#"{"gemini": {"api_key": "test-key"}}"#,
        )
        .unwrap();

        let (usecase, config) = build_usecase(&paths).await.unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!usecase.is_logged_in().await);
    }
}
