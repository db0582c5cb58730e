//! The explicit application state behind the handover shell.

use kkuldanji_core::auth::LoginGate;
use kkuldanji_core::form::FormStore;
use kkuldanji_core::session::{ChatLog, SavedSessions};
use kkuldanji_core::source::SourceSet;
use kkuldanji_core::view::TabNavigator;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio_util::sync::CancellationToken;

/// What the chat panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The live chat log.
    #[default]
    Chat,
    /// The saved-session list.
    Rooms,
}

/// Which outbound call is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CallKind {
    Generation,
    Chat,
}

#[derive(Debug, Clone)]
pub(crate) struct InFlight {
    pub(crate) id: u64,
    pub(crate) kind: CallKind,
    pub(crate) token: CancellationToken,
}

/// Everything the session owns: one report, one live log, one set of
/// sources and the saved sessions. Nothing here is shared or persisted.
#[derive(Debug, Default)]
pub struct HandoverWorkspace {
    pub(crate) login: LoginGate,
    pub(crate) sources: SourceSet,
    pub(crate) log: ChatLog,
    pub(crate) saved: SavedSessions,
    pub(crate) form: FormStore,
    pub(crate) tabs: TabNavigator,
    pub(crate) view_mode: ViewMode,
    pub(crate) in_flight: Option<InFlight>,
    next_call_id: u64,
}

impl HandoverWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn saved(&self) -> &SavedSessions {
        &self.saved
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn tabs(&self) -> &TabNavigator {
        &self.tabs
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_logged_in()
    }

    /// Starts tracking a call, returning its id and token.
    pub(crate) fn begin_call(&mut self, kind: CallKind) -> (u64, CancellationToken) {
        self.next_call_id += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            id: self.next_call_id,
            kind,
            token: token.clone(),
        });
        (self.next_call_id, token)
    }

    /// Stops tracking call `id`, if it is still the tracked one.
    pub(crate) fn finish_call(&mut self, id: u64) {
        if self.in_flight.as_ref().is_some_and(|in_flight| in_flight.id == id) {
            self.in_flight = None;
        }
    }

    /// Cancels the in-flight call when it matches `kind` (any kind if `None`).
    pub(crate) fn cancel_call(&mut self, kind: Option<CallKind>) -> Option<CallKind> {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| kind.is_none_or(|kind| kind == in_flight.kind));
        if !matches {
            return None;
        }
        let in_flight = self.in_flight.take()?;
        in_flight.token.cancel();
        Some(in_flight.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_matching_kind_only() {
        let mut workspace = HandoverWorkspace::new();
        let (_, token) = workspace.begin_call(CallKind::Generation);

        assert_eq!(workspace.cancel_call(Some(CallKind::Chat)), None);
        assert!(!token.is_cancelled());

        assert_eq!(workspace.cancel_call(None), Some(CallKind::Generation));
        assert!(token.is_cancelled());
        assert!(workspace.in_flight.is_none());
    }

    #[test]
    fn test_finish_ignores_stale_call() {
        let mut workspace = HandoverWorkspace::new();
        let (first, _) = workspace.begin_call(CallKind::Chat);
        let (second, _) = workspace.begin_call(CallKind::Chat);

        workspace.finish_call(first);
        assert!(workspace.in_flight.is_some());
        workspace.finish_call(second);
        assert!(workspace.in_flight.is_none());
    }
}
