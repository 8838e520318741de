//! Persona domain
//!
//! - [`instruction::Instruction`]: fixed or act-dependent system prompt
//! - [`entities::Persona`]: a named simulated participant
//! - [`roster::Roster`]: the moderator plus discussants in speaking order

pub mod entities;
pub mod instruction;
pub mod roster;
