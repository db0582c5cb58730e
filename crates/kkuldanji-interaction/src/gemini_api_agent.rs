//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! One agent is bound to one model and one system instruction. It sends a
//! list of turns to `models/{model}:generateContent` and returns the first
//! text part of the answer. Structured output is requested by attaching a
//! response schema.

use crate::error::AgentError;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    system_instruction: Option<String>,
    response_schema: Option<Value>,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: kkuldanji_core::config::DEFAULT_API_BASE_URL.to_string(),
            system_instruction: None,
            response_schema: None,
        }
    }

    /// Points the agent at another API root (without `/models`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Applies a per-request timeout. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Result<Self, AgentError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        self.client = builder
            .build()
            .map_err(|err| AgentError::ExecutionFailed(format!("Failed to build HTTP client: {err}")))?;
        Ok(self)
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Requests JSON output conforming to `schema`.
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `contents` and returns the reply text.
    pub async fn generate(&self, contents: Vec<Content>) -> Result<String, AgentError> {
        if contents.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "Gemini request must include at least one turn".into(),
            ));
        }

        let request = self.build_request(contents);
        tracing::debug!(
            "[Gemini] Sending {} turn(s) to {}",
            request.contents.len(),
            self.model
        );
        self.send_request(&request).await
    }

    fn build_request(&self, contents: Vec<Content>) -> GenerateContentRequest {
        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part::Text {
                text: text.to_string(),
            }],
        });

        let generation_config = self.response_schema.as_ref().map(|schema| GenerationConfig {
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: schema.clone(),
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url,
            model = self.model
        )
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, AgentError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                AgentError::ProcessError {
                    status_code: None,
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                    retry_after: None,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            tracing::warn!("[Gemini] {} answered {}", self.model, status);
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AgentError::ParseError(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::text("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::text("model", text)
    }

    fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AgentError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(AgentError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if let Some(delay) = retry_after {
        AgentError::process_error_with_retry_after(status.as_u16(), message, is_retryable, delay)
    } else {
        AgentError::ProcessError {
            status_code: Some(status.as_u16()),
            message,
            is_retryable,
            retry_after: None,
        }
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_first_text_part() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {}}, {"text": "안녕하세요"}]}}]
        }));
        assert_eq!(extract_text_response(parsed).unwrap(), "안녕하세요");
    }

    #[test]
    fn test_extract_empty_response() {
        assert_eq!(
            extract_text_response(response(json!({}))).unwrap_err(),
            AgentError::EmptyResponse
        );
        assert_eq!(
            extract_text_response(response(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]})))
                .unwrap_err(),
            AgentError::EmptyResponse
        );
        assert_eq!(
            extract_text_response(response(json!({"candidates": [{}]}))).unwrap_err(),
            AgentError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_reads_error_body() {
        let body = json!({"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}})
            .to_string();
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body, Some(Duration::from_secs(5)));

        assert_eq!(
            err,
            AgentError::ProcessError {
                status_code: Some(429),
                message: "RESOURCE_EXHAUSTED: quota".to_string(),
                is_retryable: true,
                retry_after: Some(Duration::from_secs(5)),
            }
        );
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".to_string(), None);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_parse_retry_after() {
        let header = HeaderValue::from_static("12");
        assert_eq!(parse_retry_after(Some(&header)), Some(Duration::from_secs(12)));
        let date = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_request_serialization() {
        let agent = GeminiApiAgent::new("key", "gemini-test")
            .with_system_instruction("be kind")
            .with_response_schema(json!({"type": "OBJECT"}));
        let request = agent.build_request(vec![Content::user("q"), Content::model("a")]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0], json!({"role": "user", "parts": [{"text": "q"}]}));
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["system_instruction"]["parts"][0]["text"], "be kind");
        assert_eq!(value["generation_config"]["responseMimeType"], "application/json");
        assert_eq!(value["generation_config"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_plain_request_has_no_generation_config() {
        let agent = GeminiApiAgent::new("key", "gemini-test");
        let value = serde_json::to_value(agent.build_request(vec![Content::user("q")])).unwrap();
        assert!(value.get("generation_config").is_none());
        assert!(value.get("system_instruction").is_none());
    }

    #[test]
    fn test_endpoint_and_base_url() {
        let agent = GeminiApiAgent::new("secret", "gemini-3-flash-preview")
            .with_base_url("http://localhost:9999/v1beta/");
        assert_eq!(
            agent.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert!(!agent.endpoint().contains("secret"));
    }

    #[tokio::test]
    async fn test_empty_contents_rejected() {
        let agent = GeminiApiAgent::new("key", "gemini-test");
        let err = agent.generate(Vec::new()).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }
}
