//! The three acts of the script.
//!
//! Each act method runs as far as it can and reports a [`Step`]. Phase
//! state changes happen only inside the continuations handed to the task
//! queue, so a dropped turn leaves the counters where they were.

use super::DialogueSession;
use super::types::Step;
use crate::config::pacing::pause;
use crate::ports::completion_gateway::CompletionError;
use crate::use_cases::serial_queue::{QueueError, QueuedTask, TaskOutcome};
use agora_domain::{Act, Persona, PromptTemplate, RoundOutcome, Stage, Turn};
use std::sync::Arc;
use tracing::{debug, warn};

impl DialogueSession {
    /// Act 1: one moderator question per inquirer message
    pub(super) async fn clarify(&self, content: &str) -> Result<Step, QueueError> {
        let moderator = self.roster.moderator().clone();
        let recorder = self.recorder.clone();
        let policy = self.config.policy.clone();
        let name = moderator.name().to_string();

        self.speak(&moderator, Act::Clarify, content, move |reply| {
            recorder.append(Turn::persona(&name, reply));
            match recorder.update(|s| s.progress.phase.record_clarification(reply, &policy)) {
                Ok(Some(transition)) => recorder.transitioned(transition),
                Ok(None) => {}
                Err(e) => warn!("Clarification not recorded: {}", e),
            }
        })
        .await
    }

    /// Act 2: announcements, the moderator's summary, then the rounds
    pub(super) async fn discuss(&self) -> Result<Step, QueueError> {
        let discussants = self.roster.discussants().to_vec();
        let moderator = self.roster.moderator().clone();

        let (announced, summary_provided) = self
            .recorder
            .read(|s| (s.progress.announced, s.progress.phase.summary_provided));

        if !announced {
            for persona in &discussants {
                pause(self.config.pacing.announce).await;
                self.recorder
                    .append(Turn::system(PromptTemplate::joined_announcement(persona.name())));
            }
            self.recorder.update(|s| s.progress.announced = true);
        }

        if !summary_provided {
            let recorder = self.recorder.clone();
            let name = moderator.name().to_string();
            let step = self
                .speak(
                    &moderator,
                    Act::Discuss,
                    PromptTemplate::summary_request(),
                    move |summary| {
                        recorder.append(Turn::persona(&name, summary));
                        if let Err(e) = recorder.update(|s| s.progress.phase.record_summary()) {
                            warn!("Summary not recorded: {}", e);
                        }
                    },
                )
                .await?;
            if step != Step::Advanced {
                return Ok(step);
            }
        }

        loop {
            let (round, start) = self
                .recorder
                .read(|s| (s.progress.phase.discussion_round, s.progress.next_speaker));
            debug!("Discussion round {} from speaker {}", round, start);

            for (idx, persona) in discussants.iter().enumerate().skip(start) {
                pause(self.config.pacing.turn).await;

                let recorder = self.recorder.clone();
                let policy = self.config.policy.clone();
                let name = persona.name().to_string();
                let closes_round = idx + 1 == discussants.len();

                let step = self
                    .speak(
                        persona,
                        Act::Discuss,
                        PromptTemplate::round_directive(round),
                        move |text| {
                            recorder.append(Turn::persona(&name, text));
                            let outcome = recorder.update(|s| {
                                if !closes_round {
                                    s.progress.next_speaker = idx + 1;
                                    return Ok(None);
                                }
                                s.progress.next_speaker = 0;
                                s.progress.phase.complete_round(&policy).map(Some)
                            });
                            match outcome {
                                Ok(Some(RoundOutcome::ActComplete(transition))) => {
                                    recorder.transitioned(transition)
                                }
                                Ok(Some(RoundOutcome::NextRound(next))) => {
                                    debug!("Round {} finished, round {} next", next - 1, next)
                                }
                                Ok(None) => {}
                                Err(e) => warn!("Round not completed: {}", e),
                            }
                        },
                    )
                    .await?;
                if step != Step::Advanced {
                    return Ok(step);
                }
            }

            let (stage, next_round) = self
                .recorder
                .read(|s| (s.progress.phase.stage(), s.progress.phase.discussion_round));
            if stage != Stage::Act2Discuss {
                return Ok(Step::Advanced);
            }
            if next_round == round {
                return Ok(Step::Stalled);
            }
            pause(self.config.pacing.round).await;
        }
    }

    /// Act 3: closing remarks from each discussant, then the synthesis
    pub(super) async fn close(&self) -> Result<Step, QueueError> {
        let discussants = self.roster.discussants().to_vec();
        let start = self.recorder.read(|s| s.progress.next_speaker);

        for (idx, persona) in discussants.iter().enumerate().skip(start) {
            pause(self.config.pacing.turn).await;

            let recorder = self.recorder.clone();
            let name = persona.name().to_string();
            let step = self
                .speak(
                    persona,
                    Act::Close,
                    PromptTemplate::closing_directive(),
                    move |text| {
                        recorder.append(Turn::persona(&name, text));
                        recorder.update(|s| s.progress.next_speaker = idx + 1);
                    },
                )
                .await?;
            if step != Step::Advanced {
                return Ok(step);
            }
        }

        pause(self.config.pacing.round).await;

        let moderator = self.roster.moderator().clone();
        let recorder = self.recorder.clone();
        let name = moderator.name().to_string();
        self.speak(
            &moderator,
            Act::Close,
            PromptTemplate::synthesis_request(),
            move |synthesis| {
                recorder.append(Turn::persona(&name, synthesis));
                recorder.append(Turn::system(PromptTemplate::conclusion_notice()));
                match recorder.update(|s| s.progress.phase.complete()) {
                    Ok(transition) => recorder.transitioned(transition),
                    Err(e) => warn!("Dialogue not completed: {}", e),
                }
            },
        )
        .await
    }

    /// Queue one persona turn against the live log and wait for it
    async fn speak<F>(
        &self,
        persona: &Arc<Persona>,
        act: Act,
        content: &str,
        on_response: F,
    ) -> Result<Step, QueueError>
    where
        F: FnOnce(&str) + Send + 'static,
    {
        self.recorder.notifier.on_turn_started(persona, act);

        let task = QueuedTask::new(persona.clone(), act, content, self.live_context())
            .on_response(on_response);
        let outcome = self.queue.submit(task)?.await?;

        Ok(match outcome {
            TaskOutcome::Completed(_) => Step::Advanced,
            TaskOutcome::Skipped(reason) => {
                self.recorder.skipped(persona.name(), reason.as_str());
                Step::Stalled
            }
            TaskOutcome::Failed(CompletionError::Cancelled) | TaskOutcome::Cancelled => {
                Step::Cancelled
            }
            TaskOutcome::Failed(e) => {
                self.recorder.skipped(persona.name(), &e.to_string());
                Step::Stalled
            }
        })
    }
}
