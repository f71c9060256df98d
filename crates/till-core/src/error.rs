//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Domain-state errors (no sale, no price, ...)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures (fatal)            │
//! │                                                                         │
//! │  till-cli errors (in app)                                              │
//! │  └── AppError         - Decides: print and continue, or exit           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → operator's terminal    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text IS the operator-facing message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised while building or finishing a sale.
///
/// None of these are fatal: the menu prints the message and the operation
/// leaves all state untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product row with this id.
    #[error("Product not found.")]
    ProductNotFound(i64),

    /// The product exists but no price window contains the current time.
    ///
    /// ## User Workflow
    /// ```text
    /// Add Item (product 7, qty 2)
    ///      │
    ///      ▼
    /// prices for 7: [2023-01-01 .. 2023-12-31]   ← expired
    ///      │
    ///      ▼
    /// NoActivePrice { product_id: 7 }
    ///      │
    ///      ▼
    /// Terminal: "No active price for this product."
    /// ```
    #[error("No active price for this product.")]
    NoActivePrice { product_id: i64 },

    /// `start_sale` while a sale is already in progress.
    #[error("A sale is already in progress.")]
    SaleAlreadyInProgress,

    /// Any sale operation while no sale has been started.
    #[error("No sale in progress. Start a sale first.")]
    NoSaleInProgress,

    /// Cancel or complete while no sale has been started.
    #[error("No sale in progress.")]
    NoSaleToClose,

    /// Remove requested on a sale without lines.
    #[error("No items in the sale to remove.")]
    EmptySale,

    /// Apply discount requested but nothing is valid right now.
    #[error("No active discounts available.")]
    NoActiveDiscounts,

    /// A 1-based menu selection outside the listed range.
    #[error("Invalid choice.")]
    InvalidChoice { choice: i64, max: usize },

    /// Text that should have been a number.
    #[error("Invalid input. Please enter {expected}.")]
    NotNumeric { expected: &'static str },

    /// Sale already holds the maximum number of lines.
    #[error("A sale cannot have more than {max} items.")]
    SaleTooLarge { max: usize },

    /// A line total or the running total would not fit in a `Decimal`.
    #[error("Amount too large for this sale.")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// The "please enter numeric values" error used by multi-field prompts.
    pub fn numeric_values() -> Self {
        CoreError::NotNumeric {
            expected: "numeric values",
        }
    }

    /// The "please enter a numeric value" error used by single-choice prompts.
    pub fn numeric_value() -> Self {
        CoreError::NotNumeric {
            expected: "a numeric value",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input or stored data doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A validity window that ends before it starts.
    #[error("{field} ends before it starts")]
    InvertedWindow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
