//! Transport-level errors of the Gemini client.

use kkuldanji_core::error::HandoverError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The request could not be built or sent.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The API answered with a non-success status, or the connection failed.
    #[error("Process error (status: {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The API answered but carried no text.
    #[error("Gemini API returned no text in the response candidates")]
    EmptyResponse,

    /// The response text could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AgentError {
    pub fn process_error_with_retry_after(
        status_code: u16,
        message: impl Into<String>,
        is_retryable: bool,
        retry_after: Duration,
    ) -> Self {
        Self::ProcessError {
            status_code: Some(status_code),
            message: message.into(),
            is_retryable,
            retry_after: Some(retry_after),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AgentError::ProcessError { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// The message with the retry hint appended, if the API gave one.
    pub fn describe(&self) -> String {
        match self.retry_after() {
            Some(delay) => format!("{self} (retry after {}s)", delay.as_secs()),
            None if self.is_retryable() => format!("{self} (retryable)"),
            None => self.to_string(),
        }
    }

    /// Maps a failed generation call to the domain error.
    pub fn into_generation(self) -> HandoverError {
        HandoverError::generation(self.describe())
    }

    /// Maps a failed chat call to the domain error.
    pub fn into_chat(self) -> HandoverError {
        HandoverError::chat(self.describe())
    }
}

impl From<minijinja::Error> for AgentError {
    fn from(err: minijinja::Error) -> Self {
        AgentError::ExecutionFailed(format!("Failed to render prompt: {err}"))
    }
}
