//! The seam between the use cases and the hosted model.

use crate::error::Result;
use crate::session::ChatMessage;
use crate::source::FileExcerpt;
use serde_json::Value;

/// The two outbound model calls.
///
/// Implementations own the transport, the prompt wording and the response
/// schema. Callers own truncation: excerpts arrive already capped.
#[async_trait::async_trait]
pub trait HandoverAssistant: Send + Sync {
    /// Produces a report document from the uploaded material.
    ///
    /// Must return a JSON object, otherwise `HandoverError::Generation`.
    async fn generate_report(&self, excerpts: &[FileExcerpt]) -> Result<Value>;

    /// Answers `message` given the prior `history` and the file excerpts.
    ///
    /// Failures are reported as `HandoverError::Chat`.
    async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        excerpts: &[FileExcerpt],
    ) -> Result<String>;
}
