//! Handover use case implementation.
//!
//! `HandoverUseCase` owns the workspace state and funnels every mutation
//! through a named command. The two model calls run without holding the
//! state lock: the busy flag serializes them, a cancellation token lets a
//! superseded call be dropped, and results are only applied if the call was
//! not cancelled in the meantime.

use crate::busy::BusyFlag;
use crate::export::{ExportScope, render_document, scope_tabs};
use crate::notices::{CHAT_FALLBACK_MESSAGE, GENERATION_CONFIRMATION};
use crate::workspace::{CallKind, HandoverWorkspace, ViewMode};
use kkuldanji_core::HandoverAssistant;
use kkuldanji_core::auth::Credentials;
use kkuldanji_core::config::{AppConfig, LimitConfig};
use kkuldanji_core::error::{HandoverError, Result};
use kkuldanji_core::form::FormChange;
use kkuldanji_core::report::{FieldPath, ListField, missing_sections};
use kkuldanji_core::session::{ChatMessage, ChatSession, archive};
use kkuldanji_core::source::SourceFile;
use kkuldanji_core::view::{ReportTab, TabView, field_kind, render_tab};
use kkuldanji_infrastructure::FileIntake;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// What happened to a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The model answered; the reply was appended.
    Replied(ChatMessage),
    /// The call failed; the fixed fallback was appended instead.
    Fallback(ChatMessage),
    /// Blank input, nothing was sent.
    Blank,
    /// The saved-session list is showing, nothing was sent.
    RoomsView,
}

pub struct HandoverUseCase {
    workspace: Arc<Mutex<HandoverWorkspace>>,
    assistant: Arc<dyn HandoverAssistant>,
    intake: FileIntake,
    limits: LimitConfig,
    busy: BusyFlag,
}

impl HandoverUseCase {
    pub fn new(assistant: Arc<dyn HandoverAssistant>, config: &AppConfig) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(HandoverWorkspace::new())),
            assistant,
            intake: FileIntake::new(config.upload.allowed_extensions.clone()),
            limits: config.limits.clone(),
            busy: BusyFlag::new(),
        }
    }

    // ============================================================================
    // Login
    // ============================================================================

    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let mut workspace = self.workspace.lock().await;
        workspace.login.login(credentials)?;
        tracing::info!("[Login] Signed in as {}", credentials.user_id.trim());
        Ok(())
    }

    pub async fn logout(&self) {
        self.workspace.lock().await.login.logout();
    }

    pub async fn is_logged_in(&self) -> bool {
        self.workspace.lock().await.is_logged_in()
    }

    // ============================================================================
    // Sources
    // ============================================================================

    /// Reads, encodes and adds the files at `paths`, in order.
    pub async fn upload_files(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        self.workspace.lock().await.login.require_login()?;

        let files = self.intake.read_files(paths).await?;
        self.add_sources(files.clone()).await?;
        Ok(files)
    }

    /// Adds already-encoded files.
    pub async fn add_sources(&self, files: Vec<SourceFile>) -> Result<usize> {
        let mut workspace = self.workspace.lock().await;
        workspace.login.require_login()?;
        let added = workspace.sources.add_all(files);
        tracing::info!(
            "[Upload] Added {} file(s), {} total",
            added,
            workspace.sources.len()
        );
        Ok(added)
    }

    pub async fn remove_file(&self, id: &str) -> Result<SourceFile> {
        let removed = self.workspace.lock().await.sources.remove(id)?;
        tracing::info!("[Upload] Removed {}", removed.name);
        Ok(removed)
    }

    pub async fn files(&self) -> Vec<SourceFile> {
        self.workspace.lock().await.sources.list().to_vec()
    }

    pub fn allowed_extensions(&self) -> &[String] {
        self.intake.allowed_extensions()
    }

    // ============================================================================
    // Model calls
    // ============================================================================

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Sends a chat message.
    ///
    /// The user message is appended before the call. Exactly one assistant
    /// message follows: the reply, or the fixed fallback if the call fails.
    /// A cancelled call appends nothing further and returns `Cancelled`.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        if text.trim().is_empty() {
            return Ok(SendOutcome::Blank);
        }

        let _busy = self.busy.try_acquire()?;

        let (call_id, token, history, excerpts) = {
            let mut workspace = self.workspace.lock().await;
            workspace.login.require_login()?;
            if workspace.view_mode == ViewMode::Rooms {
                return Ok(SendOutcome::RoomsView);
            }

            let history = workspace.log.messages().to_vec();
            workspace.log.push(ChatMessage::user(text));
            let excerpts = workspace.sources.excerpts(self.limits.chat_excerpt_chars);
            let (call_id, token) = workspace.begin_call(CallKind::Chat);
            (call_id, token, history, excerpts)
        };

        tracing::info!(
            "[Chat] Sending message ({} prior, {} file(s))",
            history.len(),
            excerpts.len()
        );

        let result = tokio::select! {
            _ = token.cancelled() => Err(HandoverError::Cancelled),
            reply = self.assistant.chat(text, &history, &excerpts) => reply,
        };

        let mut workspace = self.workspace.lock().await;
        workspace.finish_call(call_id);
        if token.is_cancelled() {
            tracing::info!("[Chat] Call cancelled, reply discarded");
            return Err(HandoverError::Cancelled);
        }

        match result {
            Ok(reply) => {
                let message = ChatMessage::assistant(reply);
                workspace.log.push(message.clone());
                Ok(SendOutcome::Replied(message))
            }
            Err(e) => {
                tracing::error!("[Chat] Call failed: {}", e);
                let message = ChatMessage::assistant(CHAT_FALLBACK_MESSAGE);
                workspace.log.push(message.clone());
                Ok(SendOutcome::Fallback(message))
            }
        }
    }

    /// Generates a report from every uploaded file.
    ///
    /// On success the report replaces the held one wholesale and a
    /// confirmation is appended to the chat log. On failure nothing changes
    /// and a `Generation` error is returned.
    pub async fn generate_report(&self) -> Result<()> {
        let _busy = self.busy.try_acquire()?;

        let (call_id, token, excerpts) = {
            let mut workspace = self.workspace.lock().await;
            workspace.login.require_login()?;
            let excerpts = workspace
                .sources
                .excerpts(self.limits.generation_excerpt_chars);
            let (call_id, token) = workspace.begin_call(CallKind::Generation);
            (call_id, token, excerpts)
        };

        tracing::info!("[Generate] Generating report from {} file(s)", excerpts.len());

        let result = tokio::select! {
            _ = token.cancelled() => Err(HandoverError::Cancelled),
            report = self.assistant.generate_report(&excerpts) => report,
        };

        let mut workspace = self.workspace.lock().await;
        workspace.finish_call(call_id);
        if token.is_cancelled() {
            tracing::info!("[Generate] Call cancelled, result discarded");
            return Err(HandoverError::Cancelled);
        }

        let report = result.and_then(require_object).map_err(|e| {
            tracing::error!("[Generate] Failed: {}", e);
            if e.is_generation() {
                e
            } else {
                HandoverError::generation(e.to_string())
            }
        })?;

        let missing = missing_sections(&report);
        if !missing.is_empty() {
            tracing::warn!("[Generate] Report is missing sections: {:?}", missing);
        }

        workspace.form.update(report);
        workspace
            .log
            .push(ChatMessage::assistant(GENERATION_CONFIRMATION));
        tracing::info!("[Generate] Report installed");
        Ok(())
    }

    /// Cancels the in-flight call, if any. Returns which kind was cancelled.
    pub async fn cancel(&self) -> Option<CallKind> {
        let cancelled = self.workspace.lock().await.cancel_call(None);
        if let Some(kind) = cancelled {
            tracing::info!("[Cancel] Cancelled in-flight {} call", kind);
        }
        cancelled
    }

    // ============================================================================
    // Chat log and saved sessions
    // ============================================================================

    /// Archives a non-empty log into a saved session, then clears the log and
    /// returns to the chat view. A pending chat reply is cancelled.
    pub async fn start_new_chat(&self) -> Option<ChatSession> {
        let mut workspace = self.workspace.lock().await;
        workspace.cancel_call(Some(CallKind::Chat));

        let HandoverWorkspace { log, saved, .. } = &mut *workspace;
        let archived = archive(log, saved, self.limits.session_title_chars).cloned();
        if let Some(session) = &archived {
            tracing::info!(
                "[Session] Archived '{}' ({} messages)",
                session.title,
                session.messages.len()
            );
        }

        workspace.view_mode = ViewMode::Chat;
        archived
    }

    /// Copies a saved session's messages into the live log.
    pub async fn load_session(&self, id: &str) -> Result<ChatSession> {
        let mut workspace = self.workspace.lock().await;
        let session = workspace.saved.get(id)?.clone();

        workspace.cancel_call(Some(CallKind::Chat));
        workspace.log.replace(session.messages.clone());
        workspace.view_mode = ViewMode::Chat;
        tracing::info!("[Session] Loaded '{}'", session.title);
        Ok(session)
    }

    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.workspace.lock().await.view_mode = mode;
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.workspace.lock().await.view_mode
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.workspace.lock().await.log.messages().to_vec()
    }

    pub async fn saved_sessions(&self) -> Vec<ChatSession> {
        self.workspace.lock().await.saved.list().to_vec()
    }

    // ============================================================================
    // Report editing
    // ============================================================================

    pub async fn report(&self) -> Option<Value> {
        self.workspace.lock().await.form.report().cloned()
    }

    /// Registers the form's change subscriber.
    pub async fn subscribe_form(&self) -> mpsc::UnboundedReceiver<FormChange> {
        self.workspace.lock().await.form.subscribe()
    }

    /// Writes raw input to `path`, converted by the field's kind.
    ///
    /// Returns `false` when nothing changed (no report yet, or same value).
    pub async fn edit_field(&self, path: &str, raw: &str) -> Result<bool> {
        let path = FieldPath::parse(path)?;
        let value = field_kind(&path).parse_input(raw);
        Ok(self.workspace.lock().await.form.set_field(&path, value))
    }

    /// Appends the list's template item.
    pub async fn add_item(&self, list: ListField) -> bool {
        self.workspace.lock().await.form.add_template_item(list)
    }

    pub async fn remove_item(&self, list: ListField, index: usize) -> bool {
        self.workspace
            .lock()
            .await
            .form
            .remove_item(&list.path(), index)
    }

    pub async fn toggle_checklist(&self, index: usize) -> bool {
        self.workspace.lock().await.form.toggle_checklist(index)
    }

    pub async fn set_progress(&self, index: usize, raw: &str) -> bool {
        self.workspace.lock().await.form.set_progress(index, raw)
    }

    // ============================================================================
    // Tabs and export
    // ============================================================================

    pub async fn select_tab(&self, tab: ReportTab) -> bool {
        self.workspace.lock().await.tabs.select(tab)
    }

    pub async fn active_tab(&self) -> ReportTab {
        self.workspace.lock().await.tabs.active()
    }

    pub async fn render_tab(&self, tab: ReportTab) -> TabView {
        let workspace = self.workspace.lock().await;
        render_tab(workspace.form.report(), tab)
    }

    pub async fn render_active_tab(&self) -> TabView {
        let workspace = self.workspace.lock().await;
        render_tab(workspace.form.report(), workspace.tabs.active())
    }

    /// Renders the active tab or every tab as printable text.
    pub async fn export_text(&self, scope: ExportScope) -> String {
        let workspace = self.workspace.lock().await;
        let tabs = scope_tabs(scope, workspace.tabs.active());
        render_document(workspace.form.report(), &tabs)
    }

    /// Writes the printable text to `path`.
    pub async fn export_to_file(&self, scope: ExportScope, path: &Path) -> Result<()> {
        let document = self.export_text(scope).await;
        tokio::fs::write(path, document).await.map_err(|e| {
            HandoverError::io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!("[Export] Wrote {}", path.display());
        Ok(())
    }
}

fn require_object(report: Value) -> Result<Value> {
    if report.is_object() {
        Ok(report)
    } else {
        Err(HandoverError::generation("Report must be a JSON object"))
    }
}
