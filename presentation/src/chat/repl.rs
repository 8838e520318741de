//! REPL (Read-Eval-Print Loop) for an interactive dialogue

use crate::output::console::ConsoleFormatter;
use agora_application::{DialogueError, DialogueSession, SubmitOutcome};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// What the REPL does after a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Quit,
}

/// Interactive dialogue REPL
///
/// Turns are printed by the session's notifier as they are appended; the
/// REPL only reads input, handles slash commands and reports outcomes.
pub struct ChatRepl {
    session: Arc<DialogueSession>,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(session: Arc<DialogueSession>) -> Self {
        Self {
            session,
            history_path: None,
        }
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL, submitting `topic` first when given
    pub async fn run(&self, topic: Option<String>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(topic) = topic {
            println!("{} {}", ">>>".dimmed(), topic);
            self.submit(&topic).await;
        }

        while !self.session.is_complete() {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandResult::Quit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.submit(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if self.session.is_complete() {
            println!("{}", "The dialogue is over. Bye!".dimmed());
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let roster = self.session.roster();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 Agora Dialogue              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} {} ({})",
            "Moderator:".cyan().bold(),
            roster.moderator().name(),
            roster.moderator().role_label()
        );
        println!(
            "{} {}",
            "Discussants:".cyan().bold(),
            roster
                .discussants()
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        println!("Describe your situation to begin. Type /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?        - Show this help");
        println!("  /state               - Show the current act and counters");
        println!("  /transcript          - Reprint the conversation so far");
        println!("  /quit, /exit, /q     - Leave the dialogue");
        println!();
    }

    fn handle_command(&self, cmd: &str) -> CommandResult {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandResult::Quit
            }
            "/help" | "/h" | "/?" => {
                Self::print_help();
                CommandResult::Continue
            }
            "/state" => {
                println!();
                print!("{}", ConsoleFormatter::format_state(&self.session.phase()));
                println!();
                CommandResult::Continue
            }
            "/transcript" => {
                println!();
                let roster = self.session.roster();
                for turn in self.session.transcript() {
                    println!("{}", ConsoleFormatter::format_turn(&turn, roster));
                    println!();
                }
                CommandResult::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandResult::Continue
            }
        }
    }

    async fn submit(&self, text: &str) {
        println!();
        match self.session.submit(text).await {
            Ok(SubmitOutcome::AwaitingInput) | Ok(SubmitOutcome::Complete) => {}
            Ok(SubmitOutcome::Stalled { stage }) => {
                println!(
                    "{}",
                    format!(
                        "(No reply came back; send another message to continue {}.)",
                        stage
                    )
                    .dimmed()
                );
            }
            Ok(SubmitOutcome::Cancelled) => {
                println!("{}", "(The dialogue was stopped.)".dimmed());
            }
            Err(DialogueError::Interrupted(reason)) => {
                eprintln!("{} {}", "Error:".red().bold(), reason);
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
    }
}
