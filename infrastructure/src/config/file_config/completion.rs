//! Completion endpoint configuration from TOML (`[completion]` section)

use crate::openai::DEFAULT_BASE_URL;
use agora_application::CompletionParams;
use agora_domain::{ConfigIssue, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw completion configuration from TOML
///
/// # Example
///
/// ```toml
/// [completion]
/// model = "gpt-4o-mini"
/// base_url = "https://api.openai.com/v1"
/// temperature = 0.2
/// max_tokens = 500
/// timeout_secs = 60
/// retries = 0
/// api_key_env = "OPENAI_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Extra attempts for transport errors, timeouts and 5xx/429 responses
    pub retries: u32,
    /// Name of the environment variable holding the bearer credential
    pub api_key_env: String,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        let params = CompletionParams::default();
        Self {
            model: params.model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            timeout_secs: 60,
            retries: params.retries,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl FileCompletionConfig {
    pub fn model(&self) -> Model {
        let Ok(model) = self.model.trim().parse::<Model>();
        model
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn to_params(&self) -> CompletionParams {
        CompletionParams::default()
            .with_model(self.model())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_retries(self.retries)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::empty_value("completion.model"));
        }
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::empty_value("completion.base_url"));
        } else if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://")
        {
            issues.push(ConfigIssue::suspicious(
                "completion.base_url",
                "does not start with http:// or https://",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::out_of_range(
                "completion.temperature",
                "must be between 0 and 2",
            ));
        }
        if self.max_tokens == 0 {
            issues.push(ConfigIssue::out_of_range(
                "completion.max_tokens",
                "must be greater than 0",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::out_of_range(
                "completion.timeout_secs",
                "must be greater than 0",
            ));
        }
        if self.retries > CompletionParams::MAX_RETRIES {
            issues.push(ConfigIssue::out_of_range(
                "completion.retries",
                &format!("must be at most {}", CompletionParams::MAX_RETRIES),
            ));
        }
        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::empty_value("completion.api_key_env"));
        }

        issues
    }
}
