//! # Till CLI Library
//!
//! Everything behind the `till` binary, kept in a library so whole menu
//! sessions can be driven from tests.
//!
//! ## Module Organization
//! ```text
//! till_cli/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── config.rs       ◄─── TillConfig: defaults → till.toml → TILL_* env
//! ├── error.rs        ◄─── AppError and the fatal / non-fatal split
//! ├── console.rs      ◄─── Prompt / print over BufRead + Write
//! ├── system.rs       ◄─── SaleSystem: query façade over till-db
//! ├── workflow.rs     ◄─── SaleWorkflow: NoSale ⇄ InProgress state machine
//! ├── menu.rs         ◄─── The numbered main menu loop
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── List products
//! │   ├── sale.rs     ◄─── Start / add / remove / discount / cancel / complete
//! │   └── receipt.rs  ◄─── List receipts
//! └── report.rs       ◄─── `till report`
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod report;
pub mod system;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use config::TillConfig;
pub use console::Console;
pub use error::{AppError, AppResult};
pub use system::SaleSystem;
pub use workflow::{SaleState, SaleWorkflow};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set (`RUST_LOG=till_db=debug`)
/// - Otherwise `log_filter` from [`TillConfig`]
///
/// Output goes to stderr; stdout belongs to the menu.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
