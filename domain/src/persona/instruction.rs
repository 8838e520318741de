//! Persona instructions

use crate::dialogue::act::Act;
use std::fmt;
use std::sync::Arc;

/// Function from the current act to instruction text
pub type InstructionFn = Arc<dyn Fn(Act) -> String + Send + Sync>;

/// The system prompt a persona receives
///
/// Resolution is a pure function of the act, so resolving twice for the same
/// act yields identical text.
#[derive(Clone)]
pub enum Instruction {
    /// Same text in every act
    Fixed(String),
    /// Text chosen by the act being played
    PhaseDependent(InstructionFn),
}

impl Instruction {
    pub fn fixed(text: impl Into<String>) -> Self {
        Instruction::Fixed(text.into())
    }

    pub fn phase_dependent<F>(f: F) -> Self
    where
        F: Fn(Act) -> String + Send + Sync + 'static,
    {
        Instruction::PhaseDependent(Arc::new(f))
    }

    /// Resolve the instruction text for `act`
    pub fn resolve(&self, act: Act) -> String {
        match self {
            Instruction::Fixed(text) => text.clone(),
            Instruction::PhaseDependent(f) => f(act),
        }
    }

    pub fn is_phase_dependent(&self) -> bool {
        matches!(self, Instruction::PhaseDependent(_))
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            Instruction::PhaseDependent(_) => f.write_str("PhaseDependent(..)"),
        }
    }
}
