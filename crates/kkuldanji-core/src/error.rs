//! Error types for the Kkuldanji handover assistant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Kkuldanji crate.
///
/// The two user-facing failure kinds of the product are `Generation`
/// (surfaced as a blocking alert) and `Chat` (surfaced as an inline fallback
/// message). Everything else is plumbing.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HandoverError {
    /// A field path could not be parsed
    #[error("Invalid field path: '{0}'")]
    InvalidPath(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "base64"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login or credential error
    #[error("Security error: {0}")]
    Security(String),

    /// An upload was rejected by the file type allow-list
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    /// The report generation call failed or returned unusable output
    #[error("Report generation failed: {0}")]
    Generation(String),

    /// The chat call failed
    #[error("Chat request failed: {0}")]
    Chat(String),

    /// Another outbound call is still outstanding
    #[error("Another request is already in progress")]
    Busy,

    /// The request was superseded or cancelled before it completed
    #[error("Request was cancelled")]
    Cancelled,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandoverError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates a Chat error
    pub fn chat(message: impl Into<String>) -> Self {
        Self::Chat(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a generation failure
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    /// Check if this is a chat failure
    pub fn is_chat(&self) -> bool {
        matches!(self, Self::Chat(_))
    }

    /// Check if the call was rejected because another one is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Check if the call was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HandoverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HandoverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HandoverError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HandoverError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for HandoverError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for HandoverError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for HandoverError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, HandoverError>`.
pub type Result<T> = std::result::Result<T, HandoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: HandoverError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt").into();
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: HandoverError = parse.unwrap_err().into();
        assert!(matches!(err, HandoverError::Serialization { ref format, .. } if format == "JSON"));
    }

    #[test]
    fn test_predicates() {
        assert!(HandoverError::Busy.is_busy());
        assert!(HandoverError::Cancelled.is_cancelled());
        assert!(HandoverError::generation("x").is_generation());
        assert!(HandoverError::chat("x").is_chat());
        assert!(HandoverError::not_found("file", "abc").is_not_found());
        assert!(!HandoverError::internal("x").is_busy());
    }
}
