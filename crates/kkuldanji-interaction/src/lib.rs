//! Outbound model calls for Kkuldanji.

pub mod error;
pub mod gemini_api_agent;
pub mod gemini_assistant;
pub mod prompts;
pub mod supported_models;

pub use error::AgentError;
pub use gemini_api_agent::GeminiApiAgent;
pub use gemini_assistant::{EMPTY_REPLY_FALLBACK, GeminiHandoverAssistant};
