//! OpenAI-compatible chat-completions adapter
//!
//! Implements the [`CompletionGateway`](agora_application::CompletionGateway)
//! port over HTTP against any endpoint speaking the `/chat/completions`
//! protocol.

mod gateway;
mod types;

pub use gateway::{DEFAULT_BASE_URL, OpenAiGateway};
