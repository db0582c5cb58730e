//! Saved chat session model.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Title used when a log has no user message to name it after.
pub const UNTITLED_SESSION: &str = "새 대화";

const ELLIPSIS: &str = "...";

/// An archived, read-only copy of a prior chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    /// Timestamp when the session was archived (RFC 3339)
    pub created_at: String,
}

impl ChatSession {
    /// Builds a session from `messages`, titled after the first user message.
    pub fn from_messages(messages: Vec<ChatMessage>, title_chars: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: session_title(&messages, title_chars),
            messages,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Derives a display title from the first user message.
///
/// Titles longer than `cutoff` characters keep their first `cutoff`
/// characters followed by `...`; shorter titles are kept verbatim.
pub fn session_title(messages: &[ChatMessage], cutoff: usize) -> String {
    let first = messages
        .iter()
        .find(|message| message.is_user())
        .map(|message| message.text.as_str())
        .unwrap_or(UNTITLED_SESSION);

    if first.chars().count() > cutoff {
        let mut title: String = first.chars().take(cutoff).collect();
        title.push_str(ELLIPSIS);
        title
    } else {
        first.to_string()
    }
}
