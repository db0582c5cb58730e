//! Redraws the active report tab whenever the form store changes.

use std::sync::Arc;

use kkuldanji_application::HandoverUseCase;
use kkuldanji_core::form::FormChange;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::render;

/// Subscribes to the form store and prints the active tab on every change.
///
/// The task ends when the store drops its subscriber, or when the handle is
/// aborted at logout.
pub async fn spawn(usecase: &Arc<HandoverUseCase>) -> JoinHandle<()> {
    let changes = usecase.subscribe_form().await;
    let usecase = Arc::clone(usecase);
    tokio::spawn(follow(usecase, changes, |lines| {
        for line in lines {
            println!("{line}");
        }
    }))
}

/// Renders the active tab into `out` once per received change.
pub async fn follow(
    usecase: Arc<HandoverUseCase>,
    mut changes: UnboundedReceiver<FormChange>,
    mut out: impl FnMut(Vec<String>) + Send,
) {
    while let Some(change) = changes.recv().await {
        tracing::debug!("[Cli] Form changed: {:?}", change);
        out(render::tab_view(&usecase.render_active_tab().await));
    }
    tracing::debug!("[Cli] Form view closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kkuldanji_core::HandoverAssistant;
    use kkuldanji_core::auth::Credentials;
    use kkuldanji_core::config::AppConfig;
    use kkuldanji_core::error::{HandoverError, Result};
    use kkuldanji_core::report::ListField;
    use kkuldanji_core::session::ChatMessage;
    use kkuldanji_core::source::FileExcerpt;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    struct FixedReport;

    #[async_trait]
    impl HandoverAssistant for FixedReport {
        async fn generate_report(&self, _excerpts: &[FileExcerpt]) -> Result<Value> {
            Ok(json!({"overview": {"transferor": {"name": "김철수"}}}))
        }

        async fn chat(
            &self,
            _message: &str,
            _history: &[ChatMessage],
            _excerpts: &[FileExcerpt],
        ) -> Result<String> {
            Err(HandoverError::chat("unused"))
        }
    }

    #[tokio::test]
    async fn test_redraws_on_generation_and_edits() {
        colored::control::set_override(false);
        let usecase = Arc::new(HandoverUseCase::new(
            Arc::new(FixedReport),
            &AppConfig::default(),
        ));
        usecase
            .login(&Credentials::new("kim", "secret"))
            .await
            .unwrap();

        let (tx, mut screens) = mpsc::unbounded_channel();
        let changes = usecase.subscribe_form().await;
        let task = tokio::spawn(follow(Arc::clone(&usecase), changes, move |lines| {
            let _ = tx.send(lines.join("\n"));
        }));

        usecase.generate_report().await.unwrap();
        let installed = screens.recv().await.unwrap();
        assert!(installed.contains("김철수"));
        assert!(!installed.contains("조직 개편"));

        assert!(
            usecase
                .edit_field("overview.reason", "조직 개편")
                .await
                .unwrap()
        );
        let edited = screens.recv().await.unwrap();
        assert!(edited.contains("조직 개편"));

        assert!(!usecase.edit_field("overview.reason", "조직 개편").await.unwrap());
        assert!(usecase.add_item(ListField::Checklist).await);
        screens.recv().await.unwrap();

        // A new subscriber closes the old channel, which ends the task.
        let _replacement = usecase.subscribe_form().await;
        task.await.unwrap();
        assert!(screens.try_recv().is_err());
    }
}
