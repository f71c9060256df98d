//! # Repository Module
//!
//! Database repository implementations for Till POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Reads / Writes What                              │
//! │                                                                         │
//! │  Menu / Workflow                                                       │
//! │       │                                                                 │
//! │       │  db.prices().active_price(7, now)                              │
//! │       ▼                                                                 │
//! │  ProductRepository    products, product_units        (read, seed)      │
//! │  PriceRepository      product_prices                 (read, seed)      │
//! │  DiscountRepository   discounts, discount_products   (read, seed)      │
//! │  SaleRepository       sales + sale_items + receipts  (ONE transaction) │
//! │  ReceiptRepository    receipts                       (read)            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are built at runtime with `sqlx::query_as::<_, T>` and decoded
//! through the `FromRow` derives in till-core.

pub mod discount;
pub mod price;
pub mod product;
pub mod receipt;
pub mod sale;
