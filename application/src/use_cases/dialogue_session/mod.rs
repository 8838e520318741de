//! Dialogue session use case
//!
//! [`DialogueSession`] is the phase controller of one conversation. It owns
//! the phase state, the conversation log and the task queue, and drives the
//! scripted dialogue from the inquirer's submissions:
//!
//! ```text
//! submit(text)
//!   ├─ Act1_Clarify: moderator question  ──▶ await next submission
//!   ├─ Act2_Discuss: announcements → summary → rounds 0..N
//!   ├─ Act3_Close:   closing remarks → synthesis
//!   └─ Complete:     input rejected
//! ```
//!
//! The acts run as an explicit loop; a dropped turn stalls the loop and the
//! next submission resumes where it stopped.

mod acts;
mod types;

pub use types::{DialogueError, SubmitOutcome};

use super::completion_client::CompletionClient;
use super::serial_queue::{ContextSource, QueueError, SerialTaskQueue};
use crate::config::DialogueConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::dialogue_notifier::{DialogueNotifier, NoNotifier};
use agora_domain::{
    ConversationContext, Inquiry, PhaseState, PromptTemplate, Roster, Stage, Turn,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};
use types::{Recorder, Step};

/// One conversation between the inquirer and the cast
pub struct DialogueSession {
    roster: Roster,
    config: DialogueConfig,
    queue: SerialTaskQueue,
    recorder: Recorder,
    /// Held for the whole of a submission
    gate: tokio::sync::Mutex<()>,
    busy: AtomicBool,
}

impl DialogueSession {
    /// Create a session and start its task queue on the current runtime
    pub fn new(client: Arc<CompletionClient>, roster: Roster, config: DialogueConfig) -> Self {
        Self {
            roster,
            config,
            queue: SerialTaskQueue::spawn(client),
            recorder: Recorder::new(Arc::new(NoNotifier), Arc::new(NoConversationLogger)),
            gate: tokio::sync::Mutex::new(()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn DialogueNotifier>) -> Self {
        self.recorder.notifier = notifier;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.recorder.logger = logger;
        self
    }

    // ==================== Accessors ====================

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Every turn appended so far, oldest first
    pub fn transcript(&self) -> Vec<Turn> {
        self.recorder.read(|s| s.log.turns().to_vec())
    }

    pub fn phase(&self) -> PhaseState {
        self.recorder.read(|s| s.progress.phase)
    }

    pub fn stage(&self) -> Stage {
        self.phase().stage()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        self.phase().is_complete()
    }

    /// Stop the task queue; a running submission returns
    /// [`SubmitOutcome::Cancelled`]
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }

    // ==================== Submission ====================

    /// Hand the inquirer's text to the dialogue and run the script as far
    /// as it goes.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, DialogueError> {
        let inquiry = Inquiry::new(text).map_err(|_| DialogueError::EmptyInput)?;
        if self.is_complete() {
            return Err(DialogueError::Complete);
        }
        let _gate = self.gate.try_lock().map_err(|_| DialogueError::Busy)?;

        self.set_busy(true);
        let snapshot = self.recorder.read(|s| s.progress);
        info!("Submission in {}", snapshot.phase.stage());

        self.recorder.append(Turn::inquirer(inquiry.content()));
        let result = self.run_script(inquiry.content()).await;

        let outcome = match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!("Submission interrupted: {}", e);
                self.recorder.update(|s| s.progress = snapshot);
                self.recorder
                    .append(Turn::system(PromptTemplate::interruption_notice()));
                self.recorder.logger.log(ConversationEvent::new(
                    "submission_interrupted",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                Err(DialogueError::Interrupted(e.to_string()))
            }
        };

        self.set_busy(false);
        outcome
    }

    async fn run_script(&self, content: &str) -> Result<SubmitOutcome, QueueError> {
        let mut clarified = false;
        loop {
            let stage = self.stage();
            let step = match stage {
                Stage::Act1Clarify if clarified => return Ok(SubmitOutcome::AwaitingInput),
                Stage::Act1Clarify => {
                    clarified = true;
                    self.clarify(content).await?
                }
                Stage::Act2Discuss => self.discuss().await?,
                Stage::Act3Close => self.close().await?,
                Stage::Complete => return Ok(SubmitOutcome::Complete),
            };

            match step {
                Step::Advanced => continue,
                Step::Stalled => {
                    return Ok(SubmitOutcome::Stalled {
                        stage: self.stage(),
                    });
                }
                Step::Cancelled => return Ok(SubmitOutcome::Cancelled),
            }
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
        self.recorder.notifier.on_busy_changed(busy);
    }

    /// Context built from the log when the queue dispatches the task
    fn live_context(&self) -> ContextSource {
        let recorder = self.recorder.clone();
        let window = self.config.context_window;
        ContextSource::live(move || {
            recorder.read(|s| ConversationContext::from_log(&s.log, window))
        })
    }
}

#[cfg(test)]
mod tests;
