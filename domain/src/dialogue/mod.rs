//! Dialogue domain
//!
//! The state a scripted dialogue carries between turns:
//!
//! - [`act::Act`] / [`act::Stage`]: the three acts and the terminal stage
//! - [`phase_state::PhaseState`]: counters and gates driving act transitions
//! - [`turn::Turn`] / [`log::ConversationLog`]: the append-only transcript
//! - [`context::ConversationContext`]: role-tagged entries fed back to the model

pub mod act;
pub mod context;
pub mod log;
pub mod phase_state;
pub mod policy;
pub mod turn;
