//! Application layer for agora
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CompletionParams, DialogueConfig, Pacing};
pub use ports::{
    completion_gateway::{
        CompletionChoice, CompletionError, CompletionGateway, CompletionRequest,
        CompletionResponse,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    dialogue_notifier::{DialogueNotifier, NoNotifier},
};
pub use use_cases::completion_client::CompletionClient;
pub use use_cases::dialogue_session::{DialogueError, DialogueSession, SubmitOutcome};
pub use use_cases::serial_queue::{
    ContextSource, QueueError, QueuedTask, SerialTaskQueue, SkipReason, TaskOutcome, TaskTicket,
};
