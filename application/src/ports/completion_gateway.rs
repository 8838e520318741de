//! Completion gateway port
//!
//! Defines the request/response contract of the chat-completion endpoint.
//! Transport, authentication and JSON encoding belong to the adapter.

use agora_domain::{Message, Model};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Timeout")]
    Timeout,

    #[error("Completion cancelled")]
    Cancelled,
}

impl CompletionError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Transport(_) | CompletionError::Timeout => true,
            CompletionError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// One chat-completion request: the prompt envelope plus generation parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionChoice {
    /// Generated text; `None` when the endpoint returned no content
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

/// Structured response of the completion endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
    /// Model identifier (if returned by the endpoint)
    pub model: Option<String>,
}

impl CompletionResponse {
    /// A response with a single choice carrying `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![CompletionChoice {
                content: Some(text.into()),
                finish_reason: Some("stop".to_string()),
            }],
            model: None,
        }
    }

    /// A successful response without any choices
    pub fn empty() -> Self {
        Self::default()
    }

    /// Content of the first choice, if it holds usable (non-blank) text
    pub fn generated_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Gateway to a chat-completion endpoint
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send one request and return the structured response
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}
