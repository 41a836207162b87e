mod cmd;
mod output;
mod root;

use ai_engineer_core::Spell;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ai-engineer",
    about = "Spell-driven workflow for planning, executing and reviewing AI-assisted tasks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .ai/ or .git/)
    #[arg(long, global = true, env = "AI_ENGINEER_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log rule selection and transitions to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the workflow one step
    Accio,

    /// Collect new Atlassian links from the context or plan
    Expecto,

    /// Start or restart a PR review
    Reparo,

    /// Leave the PR review
    Reverto,

    /// Return to plan editing
    Finite,

    /// Show where the workflow stands
    Lumos,

    /// Cast a spell by name
    Cast {
        /// accio, expecto, reparo, reverto, finite or lumos
        spell: Spell,
    },

    /// Show the current state and the spells available from it
    Status,

    /// Create .ai/task/ and record the start state
    Init,

    /// Forget the current state
    Reset,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Accio => cmd::spell::run(&root, Spell::Accio, cli.json),
        Commands::Expecto => cmd::spell::run(&root, Spell::Expecto, cli.json),
        Commands::Reparo => cmd::spell::run(&root, Spell::Reparo, cli.json),
        Commands::Reverto => cmd::spell::run(&root, Spell::Reverto, cli.json),
        Commands::Finite => cmd::spell::run(&root, Spell::Finite, cli.json),
        Commands::Lumos => cmd::spell::run(&root, Spell::Lumos, cli.json),
        Commands::Cast { spell } => cmd::spell::run(&root, spell, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Reset => cmd::reset::run(&root, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
