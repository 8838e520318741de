//! Dialogue session state, errors and the shared turn recorder.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::dialogue_notifier::DialogueNotifier;
use agora_domain::{ConversationLog, PhaseState, Stage, Transition, Turn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::info;

/// Errors returned to the presentation layer by
/// [`DialogueSession::submit`](super::DialogueSession::submit)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    #[error("The dialogue has concluded")]
    Complete,

    #[error("A submission is already in progress")]
    Busy,

    #[error("Input cannot be empty")]
    EmptyInput,

    #[error("Dialogue interrupted: {0}")]
    Interrupted(String),
}

/// Where a submission left the dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The moderator asked a question; the inquirer is expected to answer
    AwaitingInput,
    /// A turn was dropped; the next submission resumes from `stage`
    Stalled { stage: Stage },
    /// The dialogue reached its terminal stage
    Complete,
    /// The session shut down while the submission ran
    Cancelled,
}

/// Result of one scripted step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Advanced,
    Stalled,
    Cancelled,
}

/// Progress through the script: the phase state plus the bookkeeping that
/// lets a stalled act resume without repeating turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Progress {
    pub phase: PhaseState,
    /// "joined the chat" announcements were made
    pub announced: bool,
    /// Next discussant to speak in the current round or closing act
    pub next_speaker: usize,
}

#[derive(Debug, Default)]
pub(super) struct DialogueState {
    pub progress: Progress,
    pub log: ConversationLog,
}

/// Appends turns and applies transitions to the shared state, reporting
/// each change to the notifier and the transcript logger.
///
/// Continuations running on the queue worker hold a clone.
#[derive(Clone)]
pub(super) struct Recorder {
    state: Arc<Mutex<DialogueState>>,
    pub notifier: Arc<dyn DialogueNotifier>,
    pub logger: Arc<dyn ConversationLogger>,
}

impl Recorder {
    pub fn new(notifier: Arc<dyn DialogueNotifier>, logger: Arc<dyn ConversationLogger>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DialogueState::default())),
            notifier,
            logger,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DialogueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read<R>(&self, f: impl FnOnce(&DialogueState) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut DialogueState) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn append(&self, turn: Turn) -> usize {
        let index = self.update(|state| state.log.append(turn.clone()));

        self.logger.log(ConversationEvent::new(
            "turn_appended",
            serde_json::json!({
                "index": index,
                "role": turn.role().as_str(),
                "speaker": turn.speaker(),
                "content": turn.content(),
                "markdown": turn.is_markdown(),
            }),
        ));
        self.notifier.on_turn_appended(index, &turn);
        index
    }

    pub fn transitioned(&self, transition: Transition) {
        info!("Dialogue moved from {} to {}", transition.from, transition.to);

        self.logger.log(ConversationEvent::new(
            "act_transition",
            serde_json::json!({
                "from": transition.from.to_string(),
                "to": transition.to.to_string(),
            }),
        ));
        self.notifier.on_act_changed(&transition);

        if transition.to == Stage::Complete {
            let turns = self.read(|state| state.log.len());
            self.logger.log(ConversationEvent::new(
                "dialogue_complete",
                serde_json::json!({ "turns": turns }),
            ));
            self.notifier.on_dialogue_complete();
        }
    }

    pub fn skipped(&self, persona: &str, reason: &str) {
        self.logger.log(ConversationEvent::new(
            "turn_skipped",
            serde_json::json!({
                "persona": persona,
                "reason": reason,
            }),
        ));
    }
}
