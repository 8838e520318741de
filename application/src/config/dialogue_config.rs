//! Dialogue configuration: everything the phase controller needs besides
//! the cast and the completion client.

use super::pacing::Pacing;
use agora_domain::DialoguePolicy;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueConfig {
    pub policy: DialoguePolicy,
    pub pacing: Pacing,
    /// Most recent turns sent as context; `None` sends the whole log
    pub context_window: Option<usize>,
}

impl DialogueConfig {
    pub fn with_policy(mut self, policy: DialoguePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_context_window(mut self, window: Option<usize>) -> Self {
        self.context_window = window.filter(|n| *n > 0);
        self
    }
}
