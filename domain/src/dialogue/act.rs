//! Acts of the scripted dialogue

use serde::{Deserialize, Serialize};

/// One of the three sequential acts of a dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Act {
    /// Act 1: the moderator clarifies the inquirer's situation
    Clarify,
    /// Act 2: the discussants debate in rounds
    Discuss,
    /// Act 3: closing remarks and synthesis
    Close,
}

impl Act {
    /// Phase number handed to phase-dependent instructions (1, 2 or 3)
    pub fn number(&self) -> u8 {
        match self {
            Act::Clarify => 1,
            Act::Discuss => 2,
            Act::Close => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Act::Clarify),
            2 => Some(Act::Discuss),
            3 => Some(Act::Close),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Act::Clarify => "clarify",
            Act::Discuss => "discuss",
            Act::Close => "close",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Act::Clarify => "Act 1: Clarification",
            Act::Discuss => "Act 2: Discussion",
            Act::Close => "Act 3: Closing",
        }
    }
}

impl std::fmt::Display for Act {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// State of the phase controller's state machine
///
/// Derived from [`PhaseState`](super::phase_state::PhaseState); `Complete`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Act1Clarify,
    Act2Discuss,
    Act3Close,
    Complete,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete)
    }

    /// The act running in this stage; `None` once complete
    pub fn act(&self) -> Option<Act> {
        match self {
            Stage::Act1Clarify => Some(Act::Clarify),
            Stage::Act2Discuss => Some(Act::Discuss),
            Stage::Act3Close => Some(Act::Close),
            Stage::Complete => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Act1Clarify => "Act1_Clarify",
            Stage::Act2Discuss => "Act2_Discuss",
            Stage::Act3Close => "Act3_Close",
            Stage::Complete => "Complete",
        };
        write!(f, "{}", name)
    }
}
