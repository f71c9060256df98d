//! # Application Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Till                               │
//! │                                                                         │
//! │  Command Function  →  AppResult<()>                                    │
//! │         │                                                               │
//! │         ├── CoreError   (bad input, no sale, no price, ...)            │
//! │         │      └──► print Display text, state untouched, menu again    │
//! │         │                                                               │
//! │         ├── EndOfInput  (stdin closed)                                 │
//! │         │      └──► behave like "9. Exit"                              │
//! │         │                                                               │
//! │         └── DbError / io::Error / ConfigError                          │
//! │                └──► FATAL: leave the loop, main exits non-zero         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{CoreError, ValidationError};
use till_db::DbError;

use crate::config::ConfigError;

/// Errors surfaced by the till application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Operator or sale-state error. The message is shown as-is.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Reading the terminal or writing to it failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input ended while the menu or a prompt was waiting.
    #[error("End of input")]
    EndOfInput,
}

impl AppError {
    /// Fatal errors end the session; everything else is reported and the
    /// menu continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Db(_) | AppError::Io(_) | AppError::Config(_))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(err.into())
    }
}

/// Result type for till commands.
pub type AppResult<T> = Result<T, AppError>;
