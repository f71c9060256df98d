//! # Menu Commands
//!
//! One function per menu option. Each prompts through the [`Console`],
//! drives the [`SaleWorkflow`] and prints the outcome.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── 1. List Products
//! ├── sale.rs     ◄─── 2-7. Start / Add / Remove / Discount / Cancel / Complete
//! └── receipt.rs  ◄─── 8. List Receipts
//! ```
//!
//! ## How Commands Report Errors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command(workflow, console, now) -> AppResult<()>                       │
//! │         │                                                               │
//! │         ├── Ok(())              success text already printed           │
//! │         └── Err(AppError)       menu decides: print and continue,      │
//! │                                 exit on EndOfInput, abort if fatal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never print their own error text; [`crate::menu`] does.
//!
//! [`Console`]: crate::console::Console
//! [`SaleWorkflow`]: crate::workflow::SaleWorkflow

pub mod catalog;
pub mod receipt;
pub mod sale;

pub use catalog::list_products;
pub use receipt::list_receipts;
pub use sale::{add_item, apply_discount, cancel_sale, complete_sale, remove_item, start_sale};
