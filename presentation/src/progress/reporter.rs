//! Renders dialogue events to the console as they happen

use crate::output::console::ConsoleFormatter;
use agora_application::DialogueNotifier;
use agora_domain::{Act, Persona, Roster, Transition, Turn};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Prints each appended turn and shows a spinner while a persona thinks
pub struct DialogueReporter {
    roster: Roster,
    show_spinner: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl DialogueReporter {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            show_spinner: true,
            spinner: Mutex::new(None),
        }
    }

    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl DialogueNotifier for DialogueReporter {
    fn on_turn_appended(&self, _index: usize, turn: &Turn) {
        self.clear_spinner();
        println!("{}", ConsoleFormatter::format_turn(turn, &self.roster));
        println!();
    }

    fn on_turn_started(&self, persona: &Persona, _act: Act) {
        if !self.show_spinner {
            return;
        }
        self.clear_spinner();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{} is thinking...", persona.name()));
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_act_changed(&self, transition: &Transition) {
        if let Some(act) = transition.to.act() {
            println!("{}", ConsoleFormatter::act_banner(act));
        }
    }

    fn on_busy_changed(&self, busy: bool) {
        if !busy {
            self.clear_spinner();
        }
    }

    fn on_dialogue_complete(&self) {
        self.clear_spinner();
    }
}
