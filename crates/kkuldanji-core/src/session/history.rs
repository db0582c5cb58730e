//! The live chat log, the saved-session list and the archive move between them.

use super::message::ChatMessage;
use super::model::ChatSession;
use crate::error::{HandoverError, Result};
use serde::{Deserialize, Serialize};

/// The active, append-only message log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replaces the whole log, used when a saved session is reopened.
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    fn take(&mut self) -> Vec<ChatMessage> {
        std::mem::take(&mut self.messages)
    }
}

/// Saved sessions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSessions {
    sessions: Vec<ChatSession>,
}

impl SavedSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&ChatSession> {
        self.sessions
            .iter()
            .find(|session| session.id == id)
            .ok_or_else(|| HandoverError::not_found("session", id))
    }

    fn push_front(&mut self, session: ChatSession) {
        self.sessions.insert(0, session);
    }
}

/// Moves the live log into a new saved session at the front of the list.
///
/// Returns the new session, or `None` when the log is empty (nothing is
/// archived). Never touches the network.
pub fn archive<'a>(
    log: &mut ChatLog,
    saved: &'a mut SavedSessions,
    title_chars: usize,
) -> Option<&'a ChatSession> {
    if log.is_empty() {
        return None;
    }

    let session = ChatSession::from_messages(log.take(), title_chars);
    saved.push_front(session);
    saved.sessions.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(texts: &[&str]) -> ChatLog {
        let mut log = ChatLog::new();
        for (i, text) in texts.iter().enumerate() {
            if i % 2 == 0 {
                log.push(ChatMessage::user(*text));
            } else {
                log.push(ChatMessage::assistant(*text));
            }
        }
        log
    }

    #[test]
    fn test_archive_moves_all_messages() {
        let mut log = log_of(&["질문", "답변", "또 질문"]);
        let mut saved = SavedSessions::new();

        let session = archive(&mut log, &mut saved, 20).cloned().unwrap();

        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.title, "질문");
        assert_eq!(log.len(), 0);
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_archive_empty_log_is_noop() {
        let mut log = ChatLog::new();
        let mut saved = SavedSessions::new();

        assert!(archive(&mut log, &mut saved, 20).is_none());
        assert!(saved.is_empty());
    }

    #[test]
    fn test_newest_session_first() {
        let mut saved = SavedSessions::new();
        archive(&mut log_of(&["first"]), &mut saved, 20);
        archive(&mut log_of(&["second"]), &mut saved, 20);

        let titles: Vec<_> = saved.list().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_get_by_id() {
        let mut saved = SavedSessions::new();
        let id = archive(&mut log_of(&["q"]), &mut saved, 20).unwrap().id.clone();

        assert_eq!(saved.get(&id).unwrap().title, "q");
        assert!(saved.get("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_replace_log() {
        let mut log = log_of(&["a"]);
        log.replace(vec![ChatMessage::user("b"), ChatMessage::assistant("c")]);
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].text, "b");
    }
}
