//! inbox CLI: support inbox with a simulated AI copilot

use clap::{Parser, Subcommand};
use inbox_engine::{
    AssistantSession, ConversationStore, InboxConfig, ReplyPhase, ReplyRules, RevealTimer,
    Schedule, TickOutcome, DEFAULT_CONFIG_PATH,
};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Customer support inbox with an AI copilot, in the terminal
#[derive(Parser, Debug)]
#[command(name = "inbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Print the seed conversations
    Seed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the copilot one question and stream its answer
    Ask {
        /// The question, e.g. "How do I get a refund?"
        query: String,
    },

    /// Write the default config file
    Init,
}

const PREVIEW_CHARS: usize = 48;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        None | Some(Commands::Tui) => {
            let config = InboxConfig::load_or_default(&cli.config)?;
            // the alternate screen owns stdout, so logs go to a file
            init_file_logging(&config.log_file)?;
            tracing::info!(config = %cli.config.display(), "starting inbox");
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(inbox_tui::run_tui(&config))
        }
        Some(Commands::Seed { json }) => {
            init_stderr_logging();
            cmd_seed(json, &mut io::stdout().lock())
        }
        Some(Commands::Ask { query }) => {
            init_stderr_logging();
            let config = InboxConfig::load_or_default(&cli.config)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_ask(&query, &config, &mut io::stdout().lock()))
        }
        Some(Commands::Init) => {
            init_stderr_logging();
            cmd_init(&cli.config, &mut io::stdout().lock())
        }
    }
}

fn init_file_logging(log_path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "failed to create log directory '{}': {error}",
                    parent.display()
                )
            })?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("failed to open log file '{}': {error}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init()
        .map_err(|error| format!("failed to install logger: {error}"))?;

    Ok(())
}

/// One-shot commands keep stdout for their output.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .try_init();
}

fn cmd_seed(json: bool, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let store = ConversationStore::with_seed();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(store.conversations())?)?;
        return Ok(());
    }

    writeln!(out, "Seed conversations\n")?;
    for conversation in store.conversations() {
        let marker = if conversation.unread { "*" } else { " " };
        writeln!(
            out,
            "{marker} {:<4} {} · {}",
            conversation.id, conversation.user.name, conversation.user.company
        )?;
        if let Some(last) = conversation.last_message() {
            let preview: String = last.text.chars().take(PREVIEW_CHARS).collect();
            let ellipsis = if last.text.chars().count() > PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            writeln!(out, "       {preview}{ellipsis} ({})", last.timestamp)?;
        }
        if !conversation.tags.is_empty() {
            let tags: Vec<String> = conversation.tags.iter().map(|t| format!("#{t}")).collect();
            writeln!(out, "       {}", tags.join(" "))?;
        }
    }

    writeln!(
        out,
        "\n{} conversation(s), {} unread",
        store.conversations().len(),
        store.unread_count()
    )?;
    Ok(())
}

/// Run one query through the reply simulator on real timers.
///
/// Streamed replies are written as they reveal; delayed ones appear once the
/// delay elapses. The suggestion follows on its own line.
async fn cmd_ask(
    query: &str,
    config: &InboxConfig,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = RevealTimer::new(tx);
    let mut session = AssistantSession::new(ReplyRules::default(), config.session_timing());

    let schedule = session.ask(query);
    if schedule == Schedule::None {
        return Err("query is empty".into());
    }
    if session.phase() == ReplyPhase::Waiting {
        writeln!(out, "Thinking...")?;
    }
    timer.start(schedule);

    let mut printed = 0;
    while let Some(event) = rx.recv().await {
        match session.handle_timer(event) {
            TickOutcome::Ignored => {}
            TickOutcome::Continue => {
                if let Some(reveal) = session.reveal() {
                    let shown = reveal.revealed();
                    write!(out, "{}", &shown[printed..])?;
                    out.flush()?;
                    printed = shown.len();
                }
            }
            TickOutcome::Settled => {
                timer.cancel();
                break;
            }
        }
    }

    let Some(entry) = session.entries().last() else {
        return Err("no reply produced".into());
    };
    writeln!(out, "{}", entry.text.get(printed..).unwrap_or_default())?;

    if let Some(suggestion) = &entry.suggestion_text {
        writeln!(out, "\nSuggested reply:\n{suggestion}")?;
    }
    Ok(())
}

fn cmd_init(config_path: &Path, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    if config_path.exists() {
        writeln!(out, "Config already exists at {}", config_path.display())?;
        return Ok(());
    }

    InboxConfig::default().save(config_path)?;
    writeln!(out, "Wrote default config to {}", config_path.display())?;
    Ok(())
}
