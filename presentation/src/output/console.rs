//! Console formatter for dialogue turns

use super::markdown;
use agora_domain::{Act, PhaseState, Role, Roster, Turn};
use colored::Colorize;

/// Formats turns and dialogue state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render persona markdown with terminal styles
    pub fn render_markdown(text: &str) -> String {
        markdown::render(text)
    }

    /// Format one turn; persona turns carry their role label
    pub fn format_turn(turn: &Turn, roster: &Roster) -> String {
        match turn.role() {
            Role::System => format!("  {}", turn.content().dimmed().italic()),
            Role::User => format!("{} {}", "Inquirer:".green().bold(), turn.content()),
            Role::Assistant => {
                let header = match roster.find(turn.speaker()) {
                    Some(persona) => format!(
                        "{} {}",
                        persona.name().yellow().bold(),
                        format!("({})", persona.role_label()).dimmed()
                    ),
                    None => turn.speaker().yellow().bold().to_string(),
                };
                let body = if turn.is_markdown() {
                    Self::render_markdown(turn.content())
                } else {
                    turn.content().to_string()
                };
                format!("{}\n{}", header, Self::indent(&body, "  "))
            }
        }
    }

    /// Banner printed when an act begins
    pub fn act_banner(act: Act) -> String {
        let title = format!(" {} ", act.display_name());
        format!("\n{}\n", format!("──{:─<40}", title).cyan().bold())
    }

    /// Multi-line summary of the phase state (for `/state`)
    pub fn format_state(phase: &PhaseState) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Stage:".cyan().bold(), phase.stage()));
        output.push_str(&format!(
            "{} {}\n",
            "Clarifications:".cyan(),
            phase.clarification_count
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Discussion round:".cyan(),
            phase.discussion_round
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Summary provided:".cyan(),
            phase.summary_provided
        ));
        output
    }

    /// Indent a multi-line string; blank lines stay empty
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_turn_without_color() {
        colored::control::set_override(false);
        let roster = Roster::socratic();

        let persona = ConsoleFormatter::format_turn(
            &Turn::persona("Thales", "Think it **through**.\n\nCheck `a*b`."),
            &roster,
        );
        assert_eq!(persona, "Thales (The Logical Thinker)\n  Think it through.\n\n  Check a*b.");

        let system = ConsoleFormatter::format_turn(&Turn::system("Thales joined the chat"), &roster);
        assert_eq!(system, "  Thales joined the chat");

        let inquirer = ConsoleFormatter::format_turn(&Turn::inquirer("Hi"), &roster);
        assert_eq!(inquirer, "Inquirer: Hi");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
        assert_eq!(ConsoleFormatter::indent("a\n\nb", "  "), "  a\n\n  b");
    }
}
