//! Mutable phase state of one dialogue
//!
//! [`PhaseState`] is a plain value; the phase controller owns the only
//! instance per conversation and mutates it through the transition methods
//! below, which encode the act rules:
//!
//! ```text
//! Act1_Clarify --(count >= limit | trigger phrase)--> Act2_Discuss
//! Act2_Discuss --(summary, then rounds 0..N)-------> Act3_Close
//! Act3_Close   --(closing protocol done)------------> Complete
//! ```

use super::act::{Act, Stage};
use super::policy::DialoguePolicy;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A change of stage produced by a transition method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
}

/// Result of finishing a discussion round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Another round follows; carries the index of the next round
    NextRound(u32),
    /// The last round finished and the dialogue moved to Act 3
    ActComplete(Transition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    pub current_act: Act,
    /// Clarification rounds completed in Act 1
    pub clarification_count: u32,
    /// Index of the current discussion round in Act 2
    pub discussion_round: u32,
    pub summary_provided: bool,
    pub dialogue_complete: bool,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            current_act: Act::Clarify,
            clarification_count: 0,
            discussion_round: 0,
            summary_provided: false,
            dialogue_complete: false,
        }
    }
}

impl PhaseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        if self.dialogue_complete {
            return Stage::Complete;
        }
        match self.current_act {
            Act::Clarify => Stage::Act1Clarify,
            Act::Discuss => Stage::Act2Discuss,
            Act::Close => Stage::Act3Close,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.dialogue_complete
    }

    /// Record a moderator reply received during Act 1.
    ///
    /// Increments the clarification count and moves to Act 2 once the count
    /// reaches the policy limit or the reply contains the trigger phrase.
    pub fn record_clarification(
        &mut self,
        reply: &str,
        policy: &DialoguePolicy,
    ) -> Result<Option<Transition>, DomainError> {
        self.expect_stage(Stage::Act1Clarify, "record a clarification")?;

        self.clarification_count += 1;
        if self.clarification_count >= policy.clarification_limit
            || policy.is_triggered_by(reply)
        {
            let from = self.stage();
            self.current_act = Act::Discuss;
            self.summary_provided = false;
            self.discussion_round = 0;
            return Ok(Some(Transition {
                from,
                to: self.stage(),
            }));
        }
        Ok(None)
    }

    /// Mark the moderator's Act 2 summary as delivered
    pub fn record_summary(&mut self) -> Result<(), DomainError> {
        self.expect_stage(Stage::Act2Discuss, "record a summary")?;
        self.summary_provided = true;
        Ok(())
    }

    /// Finish the current discussion round
    pub fn complete_round(&mut self, policy: &DialoguePolicy) -> Result<RoundOutcome, DomainError> {
        self.expect_stage(Stage::Act2Discuss, "complete a round")?;
        if !self.summary_provided {
            return Err(DomainError::InvalidTransition(
                "discussion rounds start only after the summary".to_string(),
            ));
        }

        let next = self.discussion_round + 1;
        self.discussion_round = next;
        if next < policy.discussion_rounds {
            return Ok(RoundOutcome::NextRound(next));
        }

        let from = self.stage();
        self.current_act = Act::Close;
        Ok(RoundOutcome::ActComplete(Transition {
            from,
            to: self.stage(),
        }))
    }

    /// Finish the closing act; the dialogue becomes terminal
    pub fn complete(&mut self) -> Result<Transition, DomainError> {
        self.expect_stage(Stage::Act3Close, "complete the dialogue")?;
        let from = self.stage();
        self.dialogue_complete = true;
        Ok(Transition {
            from,
            to: self.stage(),
        })
    }

    fn expect_stage(&self, expected: Stage, action: &str) -> Result<(), DomainError> {
        let stage = self.stage();
        if stage == Stage::Complete {
            return Err(DomainError::DialogueComplete);
        }
        if stage != expected {
            return Err(DomainError::InvalidTransition(format!(
                "cannot {} in {}",
                action, stage
            )));
        }
        Ok(())
    }
}
