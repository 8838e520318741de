//! Completion parameters: fixed for every call of a dialogue.

use agora_domain::Model;
use serde::{Deserialize, Serialize};

/// Model and generation parameters sent with each completion request.
///
/// Defaults favour short, low-randomness replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Extra attempts for retryable failures; 0 disables retrying.
    pub retries: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.2,
            max_tokens: 500,
            retries: 0,
        }
    }
}

impl CompletionParams {
    /// Upper bound on `retries`
    pub const MAX_RETRIES: u32 = 5;

    /// Retries the client will actually make
    pub fn effective_retries(&self) -> u32 {
        self.retries.min(Self::MAX_RETRIES)
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the retry count, clamped to [`Self::MAX_RETRIES`]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.min(Self::MAX_RETRIES);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CompletionParams::default();
        assert_eq!(params.model, Model::Gpt4oMini);
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_tokens, 500);
        assert_eq!(params.retries, 0);
    }

    #[test]
    fn test_builder_chain() {
        let params = CompletionParams::default()
            .with_model(Model::Gpt4o)
            .with_temperature(0.7)
            .with_max_tokens(200)
            .with_retries(2);
        assert_eq!(params.model, Model::Gpt4o);
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_tokens, 200);
        assert_eq!(params.retries, 2);
    }

    #[test]
    fn test_retries_are_clamped() {
        let params = CompletionParams::default().with_retries(60);
        assert_eq!(params.retries, CompletionParams::MAX_RETRIES);

        let params = CompletionParams {
            retries: 60,
            ..Default::default()
        };
        assert_eq!(params.effective_retries(), CompletionParams::MAX_RETRIES);
    }
}
