mod export;
mod models;
mod run;
mod settings;
mod store;
mod summary;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use settings::Settings;

/// Expenses - a local-only personal expense logger for the terminal.
///
/// Run without a command to open the interactive view.
#[derive(Debug, Parser)]
#[command(name = "expenses", version)]
struct Cli {
    /// Expense file to use instead of the per-user default
    #[arg(long, env = "EXPENSES_FILE", global = true)]
    file: Option<PathBuf>,

    /// Symbol printed in front of amounts
    #[arg(long, env = "EXPENSES_CURRENCY", default_value = settings::DEFAULT_CURRENCY, global = true)]
    currency: String,

    #[command(subcommand)]
    command: Option<run::Command>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = match cli.file {
        Some(path) => path,
        None => settings::default_data_path()?,
    };
    let mut store = store::Store::load(&path)
        .with_context(|| format!("Failed to load expenses from {}", path.display()))?;
    let settings = Settings {
        currency: cli.currency,
    };

    match cli.command {
        None => run::as_tui(&mut store, &settings),
        Some(command) => run::as_cli(command, &mut store, &settings),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
