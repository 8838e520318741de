//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

mod completion;
mod dialogue;
mod logging;
mod output;
mod pacing;
mod repl;

pub use completion::FileCompletionConfig;
pub use dialogue::FileDialogueConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pacing::FilePacingConfig;
pub use repl::FileReplConfig;

use agora_application::{CompletionParams, DialogueConfig};
use agora_domain::{ConfigIssue, DomainError, Roster};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint and generation parameters
    pub completion: FileCompletionConfig,
    /// Presentation delays between turns
    pub pacing: FilePacingConfig,
    /// Act transition policy and context window
    pub dialogue: FileDialogueConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript and diagnostic log files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.completion.validate());
        issues.extend(self.pacing.validate());
        issues.extend(self.dialogue.validate());
        issues
    }

    pub fn completion_params(&self) -> CompletionParams {
        self.completion.to_params()
    }

    pub fn roster(&self) -> Result<Roster, DomainError> {
        self.dialogue.roster()
    }

    pub fn dialogue_config(&self) -> DialogueConfig {
        DialogueConfig::default()
            .with_policy(self.dialogue.to_policy())
            .with_pacing(self.pacing.to_pacing())
            .with_context_window(self.dialogue.context_window())
    }
}
