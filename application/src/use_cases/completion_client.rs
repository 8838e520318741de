//! Completion client
//!
//! Turns a persona turn into a prompt envelope and sends it through the
//! [`CompletionGateway`]:
//!
//! ```text
//! [context entries...] + system(persona instruction for act) + user(content)
//! ```

use crate::config::CompletionParams;
use crate::ports::completion_gateway::{
    CompletionError, CompletionGateway, CompletionRequest, CompletionResponse,
};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use agora_domain::util::preview;
use agora_domain::{Act, ConversationContext, Message, Persona};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest pause between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Pause before the retry following `attempt`: 100ms doubling per attempt
fn backoff(attempt: u32) -> Duration {
    let millis = 2u64.saturating_pow(attempt).saturating_mul(100);
    Duration::from_millis(millis).min(MAX_BACKOFF)
}

/// Sends persona turns to the completion endpoint
pub struct CompletionClient {
    gateway: Arc<dyn CompletionGateway>,
    params: CompletionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl CompletionClient {
    pub fn new(gateway: Arc<dyn CompletionGateway>, params: CompletionParams) -> Self {
        Self {
            gateway,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &CompletionParams {
        &self.params
    }

    /// Build the prompt envelope for one persona turn
    pub fn build_request(
        &self,
        persona: &Persona,
        act: Act,
        content: &str,
        context: &ConversationContext,
    ) -> CompletionRequest {
        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.extend(context.entries().iter().cloned());
        messages.push(Message::system(persona.instruction_for(act)));
        messages.push(Message::user(content));

        CompletionRequest {
            model: self.params.model.clone(),
            messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        }
    }

    /// Ask `persona` for a turn, retrying retryable failures up to the
    /// configured limit.
    pub async fn complete(
        &self,
        persona: &Persona,
        act: Act,
        content: &str,
        context: &ConversationContext,
    ) -> Result<CompletionResponse, CompletionError> {
        let request = self.build_request(persona, act, content, context);

        debug!(
            "{} ({}): {} context entries, content: {}",
            persona.name(),
            act.as_str(),
            context.len(),
            preview(content, 120)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "completion_request",
            serde_json::json!({
                "persona": persona.name(),
                "act": act.number(),
                "context_len": context.len(),
                "model": self.params.model.as_str(),
            }),
        ));

        let mut attempt = 0;
        loop {
            match self.gateway.complete(&request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.params.effective_retries() => {
                    let delay = backoff(attempt);
                    warn!(
                        "Completion for {} failed ({}), retrying in {:?}",
                        persona.name(),
                        e,
                        delay
                    );
                    attempt += 1;
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    self.conversation_logger.log(ConversationEvent::new(
                        "completion_failed",
                        serde_json::json!({
                            "persona": persona.name(),
                            "act": act.number(),
                            "error": e.to_string(),
                        }),
                    ));
                    return Err(e);
                }
            }
        }
    }
}
