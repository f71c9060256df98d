//! # till-core: Pure Business Logic for Till POS
//!
//! This crate holds the domain of the till: money, prices with validity
//! windows, discounts, and the in-memory sale that a cashier builds up
//! before it is written to storage. Nothing in here touches a database,
//! a terminal, or the clock; callers pass `now` in explicitly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till (apps/till-cli)                         │   │
//! │  │    Menu ──► Commands ──► SaleWorkflow ──► SaleSystem            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   sale    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleDraft │  │  windows  │  │   │
//! │  │   │  Receipt  │  │ Discount% │  │ SaleLine  │  │  policy   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-db (Database Layer)                     │   │
//! │  │              SQLite schema, repositories, transactions          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Product, ProductPrice, Discount, Sale, Receipt, ...)
//! - [`money`] - `Money` and `DiscountRate` over exact decimals
//! - [`pricing`] - Validity windows and the active-price policy
//! - [`sale`] - `SaleDraft`, the in-progress sale
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::str::FromStr;
//! use till_core::money::{DiscountRate, Money};
//!
//! let price = Money::from_str("49.99").unwrap();
//! let total = price * 2;
//! let discount = total.percentage(DiscountRate::from_str("3").unwrap());
//!
//! assert_eq!(discount.to_string(), "$3.00");
//! assert_eq!((total - discount).amount().to_string(), "96.9806");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use sale::{AppliedDiscount, CompletedSale, SaleDraft, SaleLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// Guards against typing 1000 instead of 10 at the quantity prompt.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of line items in one sale.
pub const MAX_SALE_LINES: usize = 100;
