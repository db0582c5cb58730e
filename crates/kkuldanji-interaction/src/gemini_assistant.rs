//! `HandoverAssistant` backed by two Gemini agents.
//!
//! Report generation uses the configured generation model with structured
//! JSON output; chat uses the chat model and sends the prior log as
//! alternating `user` / `model` turns ahead of the current question.

use crate::error::AgentError;
use crate::gemini_api_agent::{Content, GeminiApiAgent};
use crate::prompts::{CHAT_SYSTEM_INSTRUCTION, GENERATION_SYSTEM_INSTRUCTION, PromptRenderer};
use crate::supported_models::is_supported_gemini_model;
use async_trait::async_trait;
use kkuldanji_core::HandoverAssistant;
use kkuldanji_core::config::{AppConfig, SecretConfig};
use kkuldanji_core::error::{HandoverError, Result};
use kkuldanji_core::report::response_schema;
use kkuldanji_core::session::{ChatMessage, MessageRole};
use kkuldanji_core::source::FileExcerpt;
use serde_json::Value;
use std::time::Duration;

/// Returned as the chat reply when the model answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "죄송합니다. 답변을 생성하지 못했습니다.";

pub struct GeminiHandoverAssistant {
    generation_agent: GeminiApiAgent,
    chat_agent: GeminiApiAgent,
    prompts: PromptRenderer,
}

impl GeminiHandoverAssistant {
    /// Builds both agents from the app config and the loaded secrets.
    ///
    /// # Errors
    ///
    /// `Security` when no Gemini API key is configured, `Config` when the
    /// HTTP client or the prompt templates cannot be built.
    pub fn from_config(config: &AppConfig, secrets: &SecretConfig) -> Result<Self> {
        let api_key = secrets.gemini_api_key().ok_or_else(|| {
            HandoverError::security("Gemini API key is not configured (secret.json or GEMINI_API_KEY)")
        })?;

        let model_override = secrets
            .gemini
            .as_ref()
            .and_then(|gemini| gemini.model_name.clone());
        let generation_model = model_override
            .clone()
            .unwrap_or_else(|| config.models.generation_model.clone());
        let chat_model = model_override.unwrap_or_else(|| config.models.chat_model.clone());

        for model in [&generation_model, &chat_model] {
            if !is_supported_gemini_model(model) {
                tracing::warn!("[Gemini] Model '{}' is not in the supported list", model);
            }
        }

        let timeout = match config.api.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let build = |model: &str, instruction: &str| -> Result<GeminiApiAgent> {
            GeminiApiAgent::new(api_key, model)
                .with_base_url(config.api.base_url.clone())
                .with_system_instruction(instruction)
                .with_timeout(timeout)
                .map_err(|e| HandoverError::config(e.to_string()))
        };

        let generation_agent = build(&generation_model, GENERATION_SYSTEM_INSTRUCTION)?
            .with_response_schema(response_schema());
        let chat_agent = build(&chat_model, CHAT_SYSTEM_INSTRUCTION)?;

        tracing::info!(
            "[Gemini] Assistant ready (generation: {}, chat: {})",
            generation_model,
            chat_model
        );

        Ok(Self {
            generation_agent,
            chat_agent,
            prompts: PromptRenderer::new().map_err(|e| HandoverError::config(e.to_string()))?,
        })
    }
}

#[async_trait]
impl HandoverAssistant for GeminiHandoverAssistant {
    async fn generate_report(&self, excerpts: &[FileExcerpt]) -> Result<Value> {
        let prompt = self
            .prompts
            .generation_prompt(excerpts)
            .map_err(AgentError::into_generation)?;

        let text = self
            .generation_agent
            .generate(vec![Content::user(prompt)])
            .await
            .map_err(AgentError::into_generation)?;

        parse_report(&text).map_err(AgentError::into_generation)
    }

    async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        excerpts: &[FileExcerpt],
    ) -> Result<String> {
        let prompt = self
            .prompts
            .chat_prompt(message, excerpts)
            .map_err(AgentError::into_chat)?;

        let mut contents = history_turns(history);
        contents.push(Content::user(prompt));

        match self.chat_agent.generate(contents).await {
            Ok(text) => Ok(text),
            Err(AgentError::EmptyResponse) => Ok(EMPTY_REPLY_FALLBACK.to_string()),
            Err(err) => Err(err.into_chat()),
        }
    }
}

/// Maps the chat log onto Gemini turns.
pub fn history_turns(history: &[ChatMessage]) -> Vec<Content> {
    history
        .iter()
        .map(|message| match message.role {
            MessageRole::User => Content::user(message.text.clone()),
            MessageRole::Assistant => Content::model(message.text.clone()),
        })
        .collect()
}

/// Parses the generation reply into a report document.
///
/// Tolerates a surrounding markdown code fence. Anything other than a JSON
/// object is rejected.
pub fn parse_report(text: &str) -> std::result::Result<Value, AgentError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body).trim();

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AgentError::ParseError(format!("Report is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(AgentError::ParseError(
            "Report must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}
