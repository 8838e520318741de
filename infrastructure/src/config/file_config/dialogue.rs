//! Dialogue configuration from TOML (`[dialogue]` section)

use agora_domain::{ConfigIssue, DialoguePolicy, DomainError, Roster};
use serde::{Deserialize, Serialize};

/// Raw dialogue configuration from TOML
///
/// # Example
///
/// ```toml
/// [dialogue]
/// clarification_limit = 3
/// discussion_rounds = 3
/// trigger_phrase = "ready to summarize"
/// context_window = 0   # 0 sends the whole conversation
/// discussants = ["Protagoras", "Thales", "Diogenes"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDialogueConfig {
    pub clarification_limit: u32,
    pub discussion_rounds: u32,
    pub trigger_phrase: String,
    pub context_window: usize,
    /// Discussants taking part, in speaking order
    pub discussants: Vec<String>,
}

impl Default for FileDialogueConfig {
    fn default() -> Self {
        let policy = DialoguePolicy::default();
        Self {
            clarification_limit: policy.clarification_limit,
            discussion_rounds: policy.discussion_rounds,
            trigger_phrase: policy.trigger_phrase,
            context_window: 0,
            discussants: Roster::socratic()
                .discussants()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
        }
    }
}

impl FileDialogueConfig {
    pub fn to_policy(&self) -> DialoguePolicy {
        DialoguePolicy::default()
            .with_clarification_limit(self.clarification_limit)
            .with_discussion_rounds(self.discussion_rounds)
            .with_trigger_phrase(self.trigger_phrase.trim())
    }

    /// The cast for this dialogue; the moderator uses the configured
    /// trigger phrase
    pub fn roster(&self) -> Result<Roster, DomainError> {
        Roster::socratic_with(&self.to_policy(), &self.discussants)
    }

    pub fn context_window(&self) -> Option<usize> {
        (self.context_window > 0).then_some(self.context_window)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.clarification_limit == 0 {
            issues.push(ConfigIssue::out_of_range(
                "dialogue.clarification_limit",
                "must be at least 1",
            ));
        }
        if self.discussion_rounds == 0 {
            issues.push(ConfigIssue::out_of_range(
                "dialogue.discussion_rounds",
                "must be at least 1",
            ));
        }
        if self.trigger_phrase.trim().is_empty() {
            issues.push(ConfigIssue::empty_value("dialogue.trigger_phrase"));
        }
        if let Err(e) = self.roster() {
            issues.push(ConfigIssue::out_of_range(
                "dialogue.discussants",
                &e.to_string(),
            ));
        }
        if (1..4).contains(&self.context_window) {
            issues.push(ConfigIssue::suspicious(
                "dialogue.context_window",
                "fewer than 4 turns hides earlier discussants from each other",
            ));
        }

        issues
    }
}
