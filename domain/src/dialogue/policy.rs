//! Limits and trigger governing act transitions

use serde::{Deserialize, Serialize};

/// Phrase in a moderator reply that ends clarification early
pub const DEFAULT_TRIGGER_PHRASE: &str = "ready to summarize";

/// Dialogue transition policy (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialoguePolicy {
    /// Clarification rounds after which Act 1 ends
    pub clarification_limit: u32,
    /// Number of discussion rounds in Act 2
    pub discussion_rounds: u32,
    /// Case-insensitive phrase that ends Act 1 early
    pub trigger_phrase: String,
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self {
            clarification_limit: 3,
            discussion_rounds: 3,
            trigger_phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
        }
    }
}

impl DialoguePolicy {
    pub fn with_clarification_limit(mut self, limit: u32) -> Self {
        self.clarification_limit = limit;
        self
    }

    pub fn with_discussion_rounds(mut self, rounds: u32) -> Self {
        self.discussion_rounds = rounds;
        self
    }

    pub fn with_trigger_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.trigger_phrase = phrase.into();
        self
    }

    /// Whether `text` contains the trigger phrase, ignoring case
    pub fn is_triggered_by(&self, text: &str) -> bool {
        let phrase = self.trigger_phrase.trim().to_lowercase();
        !phrase.is_empty() && text.to_lowercase().contains(&phrase)
    }
}
