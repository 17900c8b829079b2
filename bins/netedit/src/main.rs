//! netedit - inspect, check and apply per-interface network configuration.

mod backend;
mod commands;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use netedit::Synchronizer;
use tokio::sync::mpsc;

use crate::backend::Backend;
use crate::commands::Context;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "netedit",
    version,
    about = "Per-interface network configuration editor"
)]
struct Cli {
    /// Settings file (YAML).
    #[arg(short = 'c', long, env = "NETEDIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Management API base URL, overriding the settings file.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Work offline against a saved network-info document.
    #[arg(long, value_name = "FILE", global = true)]
    snapshot: Option<PathBuf>,

    /// Output JSON.
    #[arg(short = 'j', long, global = true)]
    json: bool,

    /// Log debug output to stderr.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show interfaces and whether they can be edited.
    #[command(visible_alias = "ls")]
    Show(commands::show::ShowCmd),

    /// Validate an edit and preview its changes without applying it.
    Check(commands::edit::CheckCmd),

    /// Validate an edit and apply it.
    Apply(commands::edit::ApplyCmd),

    /// Poll and print interface changes until interrupted.
    Watch(commands::watch::WatchCmd),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }

    let backend = Backend::open(&settings, cli.snapshot.as_deref())?;
    let (tx, notices) = mpsc::unbounded_channel();
    let sync = Synchronizer::new(backend.clone(), backend)
        .with_policy(settings.policy()?)
        .with_options(settings.sync_options())
        .with_notifier(tx);

    let mut ctx = Context {
        sync,
        notices,
        json: cli.json,
    };

    match cli.command {
        Command::Show(cmd) => cmd.run(&mut ctx).await,
        Command::Check(cmd) => cmd.run(&mut ctx).await,
        Command::Apply(cmd) => cmd.run(&mut ctx).await,
        Command::Watch(cmd) => cmd.run(&mut ctx).await,
    }
}
