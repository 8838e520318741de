//! Wire types of the chat-completions protocol

use agora_application::{CompletionChoice, CompletionRequest, CompletionResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(super) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&CompletionRequest> for ChatRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.as_str().to_string(),
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A response body; a missing `choices` field means "no content"
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

impl From<ChatResponse> for CompletionResponse {
    fn from(response: ChatResponse) -> Self {
        Self {
            choices: response
                .choices
                .into_iter()
                .map(|c| CompletionChoice {
                    content: c.message.and_then(|m| m.content),
                    finish_reason: c.finish_reason,
                })
                .collect(),
            model: response.model,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: ErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{Message, Model};

    #[test]
    fn test_request_serializes_roles_lowercase() {
        let request = CompletionRequest {
            model: Model::Gpt4oMini,
            messages: vec![Message::system("be brief"), Message::user("hello")],
            temperature: 0.2,
            max_tokens: 500,
        };
        let json = serde_json::to_value(ChatRequest::from(&request)).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_response_without_choices_is_empty() {
        let response: ChatResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        let response = CompletionResponse::from(response);
        assert!(response.choices.is_empty());
        assert_eq!(response.generated_text(), None);
    }

    #[test]
    fn test_null_content_maps_to_none() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]}"#;
        let response = CompletionResponse::from(serde_json::from_str::<ChatResponse>(body).unwrap());
        assert_eq!(response.choices[0].content, None);
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("length"));
    }
}
