//! # Configuration
//!
//! Settings for the `till` binary.
//!
//! ## Configuration Sources (Priority Order, last wins)
//! 1. Defaults (this file)
//! 2. `till.toml` in the working directory, or the file given by `--config`
//! 3. Environment variables (`TILL_DATABASE_PATH`, `TILL_LOG_FILTER`)
//! 4. `--database <PATH>` on the command line
//!
//! ## Example `till.toml`
//! ```toml
//! database_path = "/var/lib/till/till.db"
//! log_filter = "warn,till_db=debug"
//! ```

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use till_db::DbConfig;

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "till.db";

/// Log filter used when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,till=info,till_db=info,till_cli=info,sqlx=warn";

/// Base name of the optional config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "till";

/// Till configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TillConfig {
    /// SQLite database file shared by the till, the report and the seed tool.
    pub database_path: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TillConfig {
    /// Loads configuration from defaults, a config file and `TILL_*`
    /// environment variables.
    ///
    /// With `config_file` the file must exist; without it `till.toml` is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(file)
            .add_source(Environment::with_prefix("TILL"))
            .build()?;

        let config: TillConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies the `--database` command line override.
    pub fn with_database_override(mut self, database: Option<PathBuf>) -> Self {
        if let Some(path) = database {
            self.database_path = path;
        }
        self
    }

    /// Checks values the loader cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        Ok(())
    }

    /// Database settings for [`till_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
