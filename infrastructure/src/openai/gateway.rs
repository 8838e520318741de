//! HTTP gateway to an OpenAI-compatible `/chat/completions` endpoint

use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use agora_application::{
    CompletionError, CompletionGateway, CompletionRequest, CompletionResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Completion gateway speaking the chat-completions protocol
pub struct OpenAiGateway {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl std::fmt::Debug for OpenAiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingCredentials(
                "API key is empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    /// Build a gateway whose bearer credential comes from the environment
    /// variable `api_key_env`.
    pub fn from_env(
        base_url: impl Into<String>,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let api_key = std::env::var(api_key_env).map_err(|_| {
            CompletionError::MissingCredentials(format!(
                "environment variable {} is not set",
                api_key_env
            ))
        })?;
        Self::new(base_url, api_key, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(e.to_string())
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let url = self.endpoint();
        let body = ChatRequest::from(request);
        debug!(
            "POST {} ({} messages, model {})",
            url,
            body.messages.len(),
            body.model
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!("Completion endpoint returned {}: {}", status, message);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
        Ok(parsed.into())
    }
}
