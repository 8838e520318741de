//! Conversation context fed to the completion model

use super::log::ConversationLog;
use super::turn::Turn;
use crate::session::entities::Message;

/// Ordered, role-tagged entries derived from the conversation log
///
/// Each entry carries the turn's role and `"<speaker>: <content>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    entries: Vec<Message>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from turns in chronological order
    pub fn from_turns(turns: &[Turn]) -> Self {
        Self {
            entries: turns
                .iter()
                .map(|t| Message::new(t.role(), t.attributed_content()))
                .collect(),
        }
    }

    /// Build a context from the log.
    ///
    /// With a window, only the most recent `window` turns are kept; a window
    /// of zero means the whole log. The latest turn is always included.
    pub fn from_log(log: &ConversationLog, window: Option<usize>) -> Self {
        match window {
            Some(n) if n > 0 => Self::from_turns(log.recent(n)),
            _ => Self::from_turns(log.turns()),
        }
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.entries
    }
}
