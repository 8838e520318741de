//! Infrastructure layer for agora
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileCompletionConfig, FileConfig, FileDialogueConfig,
    FileLoggingConfig, FileOutputConfig, FilePacingConfig, FileReplConfig, expand_home,
};
pub use logging::JsonlConversationLogger;
pub use openai::{DEFAULT_BASE_URL, OpenAiGateway};
