//! Chat messages, the live log and archived sessions.

mod history;
mod message;
mod model;

pub use history::{ChatLog, SavedSessions, archive};
pub use message::{ChatMessage, MessageRole};
pub use model::{ChatSession, UNTITLED_SESSION, session_title};
