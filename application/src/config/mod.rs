//! Application-level configuration.
//!
//! These types control how the dialogue use case behaves:
//!
//! - [`CompletionParams`]: model and generation parameters for every call
//! - [`Pacing`]: presentation delays between turns
//! - [`DialogueConfig`]: transition policy, pacing and context window

pub mod completion_params;
pub mod dialogue_config;
pub mod pacing;

pub use completion_params::CompletionParams;
pub use dialogue_config::DialogueConfig;
pub use pacing::Pacing;
