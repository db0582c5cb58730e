//! Supported Gemini model IDs.
//!
//! | Model ID | Used for | Notes |
//! |----------|----------|-------|
//! | `gemini-3-pro-preview` | Report generation (default) | Structured JSON output |
//! | `gemini-3-flash-preview` | Chat (default) | Fast replies |
//! | `gemini-3.1-pro-preview` | Either | Newer flagship |
//! | `gemini-2.5-pro` | Either | Stable |
//! | `gemini-2.5-flash` | Either | Stable, budget-friendly |
//! | `gemini-2.5-flash-lite` | Chat | Lightest option |
//!
//! Reference: <https://ai.google.dev/gemini-api/docs/models>
//!
//! # Updating
//!
//! When the defaults change, update `DEFAULT_GENERATION_MODEL` and
//! `DEFAULT_CHAT_MODEL` in `kkuldanji-core/src/config.rs` and the table
//! above. Models outside this list still work; they only log a warning.

pub const SUPPORTED_GEMINI_MODELS: &[&str] = &[
    "gemini-3-pro-preview",
    "gemini-3-flash-preview",
    "gemini-3.1-pro-preview",
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
];

pub fn is_supported_gemini_model(model: &str) -> bool {
    SUPPORTED_GEMINI_MODELS.contains(&model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kkuldanji_core::config::{DEFAULT_CHAT_MODEL, DEFAULT_GENERATION_MODEL};

    #[test]
    fn test_defaults_are_supported() {
        assert!(is_supported_gemini_model(DEFAULT_GENERATION_MODEL));
        assert!(is_supported_gemini_model(DEFAULT_CHAT_MODEL));
        assert!(!is_supported_gemini_model("gpt-5"));
    }
}
