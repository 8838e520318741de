//! CLI entrypoint for agora
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agora_application::{
    CompletionClient, CompletionGateway, ConversationLogger, DialogueSession, Pacing,
};
use agora_domain::Model;
use agora_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway, expand_home,
};
use agora_presentation::{ChatRepl, Cli, DialogueReporter, OutputConfig, ReplConfig};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_deref().map(expand_home));
    let _guard = init_tracing(cli.verbose, log_file.as_deref())?;

    info!("Starting agora");

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
        eprintln!("Warning: {}", issue.message);
    }
    let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
    if !errors.is_empty() {
        for issue in &errors {
            eprintln!("Error: {}", issue.message);
        }
        bail!("Invalid configuration ({} error(s))", errors.len());
    }

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        show_progress: config.output.show_progress && !cli.quiet,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    let session = build_session(&cli, &config, &output)?;

    let repl_config = ReplConfig {
        history_file: config.repl.history_file.as_deref().map(expand_home),
    };
    let repl = ChatRepl::new(Arc::new(session)).with_history_path(repl_config.history_path());

    repl.run(cli.topic.clone()).await?;

    Ok(())
}

/// Install the tracing subscriber; logs go to `log_file` when given,
/// stderr otherwise. `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Failed to create {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Wire gateway, completion client, transcript logger and reporter into a
/// dialogue session.
fn build_session(
    cli: &Cli,
    config: &FileConfig,
    output: &OutputConfig,
) -> Result<DialogueSession> {
    let completion = &config.completion;

    let gateway: Arc<dyn CompletionGateway> = Arc::new(
        OpenAiGateway::from_env(
            completion.base_url.clone(),
            &completion.api_key_env,
            completion.timeout(),
        )
        .context("Cannot reach the completion endpoint")?,
    );

    let mut params = config.completion_params();
    if let Some(ref model) = cli.model {
        // FromStr for Model is infallible
        let Ok(model) = model.parse::<Model>();
        params = params.with_model(model);
    }
    info!("Using model {}", params.model);

    let transcript: Option<PathBuf> = cli
        .transcript
        .clone()
        .or_else(|| config.logging.transcript.as_deref().map(expand_home));

    let mut client = CompletionClient::new(gateway, params);
    let mut conversation_logger: Option<Arc<dyn ConversationLogger>> = None;
    if let Some(path) = transcript {
        let logger = JsonlConversationLogger::create(&path)
            .with_context(|| format!("Failed to open transcript {}", path.display()))?;
        info!("Writing transcript to {}", path.display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        client = client.with_conversation_logger(logger.clone());
        conversation_logger = Some(logger);
    }

    let mut dialogue = config.dialogue_config();
    if cli.no_pacing {
        dialogue = dialogue.with_pacing(Pacing::none());
    }

    let roster = config.roster().context("Invalid dialogue cast")?;
    let reporter = DialogueReporter::new(roster.clone()).with_spinner(output.show_progress);

    let mut session = DialogueSession::new(Arc::new(client), roster, dialogue)
        .with_notifier(Arc::new(reporter));
    if let Some(logger) = conversation_logger {
        session = session.with_conversation_logger(logger);
    }

    Ok(session)
}
