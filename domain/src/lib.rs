//! Domain layer for agora
//!
//! This crate contains the core dialogue model: personas, acts, turns and
//! the rules that move a dialogue from one act to the next.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Acts
//!
//! A dialogue runs through three acts, decided by the moderator persona:
//!
//! - **Clarify**: the moderator questions the inquirer
//! - **Discuss**: discussants debate in fixed rounds after a summary
//! - **Close**: closing remarks and a final synthesis
//!
//! ## Conversation Log
//!
//! Every utterance is an immutable [`Turn`] appended to the
//! [`ConversationLog`]. The [`ConversationContext`] sent to the model is
//! derived from the log.

pub mod config;
pub mod core;
pub mod dialogue;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, inquiry::Inquiry, model::Model};
pub use dialogue::{
    act::{Act, Stage},
    context::ConversationContext,
    log::ConversationLog,
    phase_state::{PhaseState, RoundOutcome, Transition},
    policy::DialoguePolicy,
    turn::{INQUIRER, SYSTEM, Turn},
};
pub use persona::{
    entities::Persona,
    instruction::{Instruction, InstructionFn},
    roster::Roster,
};
pub use prompt::PromptTemplate;
pub use session::entities::{Message, Role};
