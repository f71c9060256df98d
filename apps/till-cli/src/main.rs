//! # Till
//!
//! Interactive point-of-sale terminal.
//!
//! ## Usage
//! ```bash
//! # Interactive menu against ./till.db
//! till
//!
//! # Another database, explicit config file
//! till --config /etc/till/till.toml --database /var/lib/till/shop.db run
//!
//! # Read-only report
//! till report
//! ```
//!
//! ## Startup
//! ```text
//! clap args ──► TillConfig::load ──► init_tracing ──► Database::new
//!                                                        │ (migrations)
//!                               ┌────────────────────────┤
//!                               ▼                        ▼
//!                         menu::run_menu        report::write_report
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use till_cli::{init_tracing, menu, report, Console, SaleSystem, SaleWorkflow, TillConfig};
use till_db::Database;

#[derive(Debug, Parser)]
#[command(name = "till", version, about = "Till POS interactive terminal")]
struct Cli {
    /// Configuration file (defaults to ./till.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(short, long, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the interactive sale menu (default)
    Run,
    /// Print products, discounts and receipts, then exit
    Report,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TillConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_database_override(cli.database);

    init_tracing(&config.log_filter);
    info!(database = %config.database_path.display(), "Starting till");

    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("failed to open database {}", config.database_path.display()))?;
    let system = SaleSystem::new(db.clone());

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let mut workflow = SaleWorkflow::new(system);
            let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
            menu::run_menu(&mut workflow, &mut console)
                .await
                .context("till session aborted")
        }
        Command::Report => {
            let mut out = io::stdout().lock();
            report::write_report(&system, &mut out)
                .await
                .context("failed to write report")
        }
    };

    db.close().await;
    info!("Till stopped");
    result
}
