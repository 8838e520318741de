//! Dialogue notification port
//!
//! Defines how the presentation layer learns about a running dialogue.

use agora_domain::{Act, Persona, Transition, Turn};

/// Callbacks fired while a dialogue runs
///
/// Implementations live in the presentation layer and can render turns in
/// various ways (console, TUI, tests). Callbacks may fire from the task
/// queue's worker, so implementations must be thread-safe.
pub trait DialogueNotifier: Send + Sync {
    /// Called after a turn is appended to the conversation log
    fn on_turn_appended(&self, index: usize, turn: &Turn);

    /// Called when a persona is about to be asked for a turn
    fn on_turn_started(&self, _persona: &Persona, _act: Act) {}

    /// Called when the dialogue changes stage
    fn on_act_changed(&self, _transition: &Transition) {}

    /// Called when a submission starts or finishes
    fn on_busy_changed(&self, _busy: bool) {}

    /// Called once the dialogue reaches its terminal stage
    fn on_dialogue_complete(&self) {}
}

/// No-op notifier for when nothing needs to be rendered
pub struct NoNotifier;

impl DialogueNotifier for NoNotifier {
    fn on_turn_appended(&self, _index: usize, _turn: &Turn) {}
}
