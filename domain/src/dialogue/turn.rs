//! Turn entity: one immutable utterance in the conversation log

use crate::session::entities::Role;
use serde::{Deserialize, Serialize};

/// Speaker name used for turns typed by the human
pub const INQUIRER: &str = "Inquirer";

/// Speaker name used for announcements and notices
pub const SYSTEM: &str = "System";

/// One utterance in the conversation log
///
/// Fields are private so a turn cannot be edited after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    speaker: String,
    content: String,
    is_markdown: bool,
}

impl Turn {
    pub fn new(
        role: Role,
        speaker: impl Into<String>,
        content: impl Into<String>,
        is_markdown: bool,
    ) -> Self {
        Self {
            role,
            speaker: speaker.into(),
            content: content.into(),
            is_markdown,
        }
    }

    /// A turn typed by the inquirer
    pub fn inquirer(content: impl Into<String>) -> Self {
        Self::new(Role::User, INQUIRER, content, false)
    }

    /// A generated turn spoken by a persona
    pub fn persona(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, name, content, true)
    }

    /// An announcement or notice from the system
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, SYSTEM, content, false)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_markdown(&self) -> bool {
        self.is_markdown
    }

    /// Text of this turn as it appears in a model context: `"<speaker>: <content>"`
    pub fn attributed_content(&self) -> String {
        format!("{}: {}", self.speaker, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let user = Turn::inquirer("hello");
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.speaker(), "Inquirer");
        assert!(!user.is_markdown());

        let persona = Turn::persona("Thales", "*Logically*, yes.");
        assert_eq!(persona.role(), Role::Assistant);
        assert!(persona.is_markdown());

        let system = Turn::system("Thales joined the chat");
        assert_eq!(system.role(), Role::System);
        assert_eq!(system.speaker(), "System");
    }

    #[test]
    fn test_attributed_content() {
        let turn = Turn::persona("Diogenes", "Nonsense.");
        assert_eq!(turn.attributed_content(), "Diogenes: Nonsense.");
    }
}
