//! Persona entity

use super::instruction::Instruction;
use crate::dialogue::act::Act;

/// A named simulated participant (Entity)
///
/// Personas are immutable once built and shared by reference.
#[derive(Debug, Clone)]
pub struct Persona {
    name: String,
    role_label: String,
    instruction: Instruction,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        role_label: impl Into<String>,
        instruction: Instruction,
    ) -> Self {
        Self {
            name: name.into(),
            role_label: role_label.into(),
            instruction,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label, e.g. "The Logical Thinker"
    pub fn role_label(&self) -> &str {
        &self.role_label
    }

    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    /// Instruction text for the given act
    pub fn instruction_for(&self, act: Act) -> String {
        self.instruction.resolve(act)
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
