//! Application and secret configuration models.
//!
//! `AppConfig` is read from `config.toml`; every field has a default so a
//! missing file or a partial file is always usable. `SecretConfig` mirrors
//! `secret.json` and only ever holds credentials.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GENERATION_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models: ModelConfig,
    pub limits: LimitConfig,
    pub upload: UploadConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model used for report generation.
    pub generation_model: String,
    /// Model used for chat replies.
    pub chat_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }
}

/// Hard caps applied before anything is sent or displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Characters of each file included in the generation prompt.
    pub generation_excerpt_chars: usize,
    /// Characters of each file included in the chat prompt.
    pub chat_excerpt_chars: usize,
    /// Characters of the first user message kept as a session title.
    pub session_title_chars: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            generation_excerpt_chars: 3000,
            chat_excerpt_chars: 1000,
            session_title_chars: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// File extensions accepted at upload, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: ["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds. `0` waits indefinitely.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 0,
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides both configured models when set.
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The Gemini API key, if one is configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|gemini| gemini.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}
