//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("The dialogue is complete")]
    DialogueComplete,
}

impl DomainError {
    /// Check if this error means the dialogue no longer accepts input
    pub fn is_complete(&self) -> bool {
        matches!(self, DomainError::DialogueComplete)
    }
}
