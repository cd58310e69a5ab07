//! Battle simulator entry point.
//!
//! Run with: `mvm <command>`. The run mode, seed and round ceiling come from
//! the environment (`MODE`, `BATTLE_SEED`, `MAX_ROUNDS`, `STRICT_HOOKS`),
//! optionally via a `.env` file.
mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use commands::{Batch, Plan, Run, Show};
use runtime::SimulatorConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Deterministic turn-based battle simulator
#[derive(Parser)]
#[command(name = "mvm")]
#[command(about = "Deterministic turn-based battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for combat.log
    #[arg(long, global = true, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the battles of a battle plan in order
    Plan(Plan),

    /// Run a batch of battles between two combatants and tally the winners
    Batch(Batch),

    /// Run a single battle and print its result
    Run(Run),

    /// Print the stat blocks of two combatants and a terrain
    Show(Show),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_dir = cli.log_dir.unwrap_or_else(default_log_dir);
    setup_logging(&log_dir)?;

    let config = SimulatorConfig::from_env();
    tracing::info!(mode = %config.mode, seed = ?config.seed, "configuration loaded");

    match cli.command {
        Command::Plan(cmd) => cmd.execute(config),
        Command::Batch(cmd) => cmd.execute(config),
        Command::Run(cmd) => cmd.execute(config),
        Command::Show(cmd) => cmd.execute(config),
    }
}

/// Setup logging to both stderr and file
fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "combat.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::debug!("Log file: {}/combat.log", log_dir.display());
    Ok(())
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("mvm").join("logs")
}
