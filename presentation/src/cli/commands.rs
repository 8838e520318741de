//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for agora
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(author, version, about = "A Socratic dialogue with a council of personas")]
#[command(long_about = r#"
Agora talks your situation through with four personas: Socrates moderates,
Protagoras, Thales and Diogenes discuss.

The dialogue has three acts:
1. Clarification: Socrates questions you until he can summarize
2. Discussion: the others join and debate over several rounds
3. Closing: each gives a closing remark and Socrates delivers a synthesis

Configuration files are loaded from (in priority order):
1. AGORA_<SECTION>__<KEY>           Environment variables
2. --config <path>                  Explicit config file
3. ./agora.toml                     Project-level config
4. ~/.config/agora/config.toml      Global config

The API key is read from the variable named by completion.api_key_env
(default OPENAI_API_KEY).

Example:
  agora "I'm stuck deciding between two job offers."
  agora -m gpt-4o --no-pacing
  agora --transcript dialogue.jsonl -vv --log-file agora.log
"#)]
pub struct Cli {
    /// Opening message for the moderator (prompted for when omitted)
    pub topic: Option<String>,

    /// Completion model for every persona
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Render turns without delays between them
    #[arg(long)]
    pub no_pacing: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write a JSONL transcript of dialogue events
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_topic_and_flags() {
        let cli = Cli::try_parse_from([
            "agora",
            "-m",
            "gpt-4o",
            "-vv",
            "--no-pacing",
            "--transcript",
            "out.jsonl",
            "Should I move abroad?",
        ])
        .unwrap();

        assert_eq!(cli.topic.as_deref(), Some("Should I move abroad?"));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_pacing);
        assert_eq!(cli.transcript, Some(PathBuf::from("out.jsonl")));
        assert!(!cli.quiet);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["agora"]).unwrap();
        assert!(cli.topic.is_none());
        assert!(cli.model.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }
}
