//! The cast of a dialogue

use super::entities::Persona;
use super::instruction::Instruction;
use crate::core::error::DomainError;
use crate::dialogue::policy::DialoguePolicy;
use crate::prompt::PromptTemplate;
use std::collections::HashSet;
use std::sync::Arc;

const PROTAGORAS_INSTRUCTION: &str = "Analyze the latest points raised in the conversation, focusing on the Inquirer's specific situation or topic. Provide behavioural insights and point out biases that could influence the discussion. Avoid abstract discussions and keep responses to 1-2 sentences. Only give advice once you have enough clarity.";

const THALES_INSTRUCTION: &str = "Break down the Inquirer's situation or topic into logical components. Engage with previous statements by offering fundamental reasoning specific to the discussion at hand. Avoid abstract philosophical topics and keep responses to 1-2 sentences. Only give advice once you have enough clarity.";

const DIOGENES_INSTRUCTION: &str = "Directly challenge assumptions in the ongoing discussion with wit and critique. Expose any contradictions and biases related to the specific situation or topic. Avoid abstract philosophical discussions and keep responses to 1-2 sentences. Only give advice once you have enough clarity.";

/// Moderator plus discussants in declared speaking order
#[derive(Debug, Clone)]
pub struct Roster {
    moderator: Arc<Persona>,
    discussants: Vec<Arc<Persona>>,
}

impl Roster {
    /// Build a roster, rejecting empty casts and duplicate names
    pub fn new(moderator: Persona, discussants: Vec<Persona>) -> Result<Self, DomainError> {
        if discussants.is_empty() {
            return Err(DomainError::InvalidRoster(
                "at least one discussant is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in std::iter::once(&moderator).chain(discussants.iter()) {
            if persona.name().trim().is_empty() {
                return Err(DomainError::InvalidRoster(
                    "persona names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(persona.name().to_lowercase()) {
                return Err(DomainError::InvalidRoster(format!(
                    "duplicate persona name: {}",
                    persona.name()
                )));
            }
        }

        Ok(Self {
            moderator: Arc::new(moderator),
            discussants: discussants.into_iter().map(Arc::new).collect(),
        })
    }

    /// The Socratic cast: Socrates moderates Protagoras, Thales and Diogenes
    pub fn socratic() -> Self {
        Self::socratic_cast(&DialoguePolicy::default())
    }

    /// The Socratic cast under `policy`, keeping only the named discussants
    /// in the given order.
    ///
    /// The moderator is told to say the policy's trigger phrase when ready.
    pub fn socratic_with(
        policy: &DialoguePolicy,
        discussants: &[String],
    ) -> Result<Self, DomainError> {
        let cast = Self::socratic_cast(policy);
        let selected = discussants
            .iter()
            .map(|name| {
                cast.discussants
                    .iter()
                    .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
                    .map(|p| Persona::clone(p))
                    .ok_or_else(|| DomainError::UnknownPersona(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(Persona::clone(&cast.moderator), selected)
    }

    fn socratic_cast(policy: &DialoguePolicy) -> Self {
        let trigger_phrase = policy.trigger_phrase.clone();
        Self {
            moderator: Arc::new(Persona::new(
                "Socrates",
                "The Orchestrator",
                Instruction::phase_dependent(move |act| {
                    PromptTemplate::moderator_instruction(act, &trigger_phrase)
                }),
            )),
            discussants: vec![
                Arc::new(Persona::new(
                    "Protagoras",
                    "The Behavioural Scientist",
                    Instruction::fixed(PROTAGORAS_INSTRUCTION),
                )),
                Arc::new(Persona::new(
                    "Thales",
                    "The Logical Thinker",
                    Instruction::fixed(THALES_INSTRUCTION),
                )),
                Arc::new(Persona::new(
                    "Diogenes",
                    "The Cynic Challenger",
                    Instruction::fixed(DIOGENES_INSTRUCTION),
                )),
            ],
        }
    }

    pub fn moderator(&self) -> &Arc<Persona> {
        &self.moderator
    }

    /// Non-moderator personas in speaking order
    pub fn discussants(&self) -> &[Arc<Persona>] {
        &self.discussants
    }

    /// All personas, moderator first
    pub fn all(&self) -> impl Iterator<Item = &Arc<Persona>> {
        std::iter::once(&self.moderator).chain(self.discussants.iter())
    }

    /// Look up a persona by name, ignoring case
    pub fn find(&self, name: &str) -> Option<&Arc<Persona>> {
        self.all().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn is_moderator(&self, name: &str) -> bool {
        self.moderator.name().eq_ignore_ascii_case(name)
    }
}
