//! Secret configuration file storage.
//!
//! Read-only access to secret.json. The file should have appropriate
//! permissions (e.g., 600) since it is plaintext JSON.

use kkuldanji_core::config::SecretConfig;
use kkuldanji_core::error::{HandoverError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads and parses secret.json.
    ///
    /// Parse errors are reported without echoing file content.
    pub fn load(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Err(HandoverError::not_found(
                "secret file",
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            HandoverError::config(format!(
                "Failed to parse {} at line {}",
                self.path.display(),
                e.line()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        assert!(!storage.exists());
        assert!(storage.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{"gemini": {"api_key": "test-key", "model_name": "gemini-x"}}"#,
        )
        .unwrap();

        let config = SecretStorage::with_path(file_path).load().unwrap();
        assert_eq!(config.gemini_api_key(), Some("test-key"));
        assert_eq!(
            config.gemini.unwrap().model_name.as_deref(),
            Some("gemini-x")
        );
    }

    #[test]
    fn test_load_invalid_json_hides_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{"gemini": {"api_key": "leaky"#).unwrap();

        let err = SecretStorage::with_path(file_path).load().unwrap_err();
        assert!(err.is_config());
        assert!(!err.to_string().contains("leaky"));
    }
}
