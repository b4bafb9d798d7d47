use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use tier_cli::app;
use tier_cli::config::{AppConfig, Overrides};
use tier_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Onboarding wizard for the pricing dashboard.
///
/// Walks through choosing a data type and input method, entering a pricing
/// tier, and confirming it into the configured tier store.
#[derive(Debug, Parser)]
#[command(name = "tier-tester", version, about)]
struct Cli {
    /// TOML settings file. Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Connection string. For SQLite a file path (e.g. `tiers.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file as well as stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the onboarding wizard (default).
    Onboard {
        /// Print the confirmed record as JSON.
        #[arg(long)]
        print_payload: bool,
    },
    /// List the stored pricing tiers.
    Tiers,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(
        cli.config.as_deref(),
        Overrides {
            backend: cli.backend,
            database: cli.db,
            log_level: cli.log_level,
            log_file: cli.log_file,
        },
    )?;
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;
    debug!(?config, "configuration loaded");

    let repo = app::open_repository(&config).await?;
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Command::Onboard {
        print_payload: false,
    }) {
        Command::Onboard { print_payload } => {
            app::onboard(&*repo, io::stdin().lock(), &mut stdout, print_payload)
                .await
                .context("onboarding failed")?;
        }
        Command::Tiers => app::print_tiers(&*repo, &mut stdout).await?,
    }
    Ok(())
}
