//! # Domain Types
//!
//! Core domain types used throughout Till POS. Field names match the
//! column names of the shared SQLite schema so that, with the `sqlx`
//! feature, every entity decodes straight from a row.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference data                       Transactions                      │
//! │  ┌─────────────────┐                  ┌─────────────────┐              │
//! │  │    Product      │◄── product_id ───│    SaleItem     │              │
//! │  │  ProductUnit    │                  │  price snapshot │              │
//! │  │  ProductPrice   │                  └────────┬────────┘              │
//! │  │  [start, end]   │                           │ sale_id               │
//! │  └─────────────────┘                  ┌────────▼────────┐              │
//! │  ┌─────────────────┐                  │      Sale       │              │
//! │  │    Discount     │                  │  total, status  │              │
//! │  │  percentage     │                  └────────┬────────┘              │
//! │  │  [start, end]   │                           │ 1:1                   │
//! │  └─────────────────┘                  ┌────────▼────────┐              │
//! │                                       │     Receipt     │              │
//! │                                       └─────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are integers generated by the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{DiscountRate, Money};
use crate::pricing;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,

    /// Display name shown to the cashier.
    pub name: String,

    pub description: String,

    pub category: String,

    /// Unit label used when reporting quantities ("pcs", "kg", ...).
    pub unit: String,
}

/// Fields for inserting a product; the id is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub unit: String,
}

// =============================================================================
// Product Unit
// =============================================================================

/// A pack size a product is stocked in (e.g. 6 for a six-pack).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductUnit {
    pub unit_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Product Price
// =============================================================================

/// A price for a product, valid inside `[start_date, end_date]`.
///
/// A product can have many rows; which one applies at a given moment is
/// decided by [`pricing::select_active_price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductPrice {
    pub price_id: i64,
    pub product_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub price: Money,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl ProductPrice {
    /// Checks whether `now` falls inside this price's validity window.
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        pricing::window_contains(self.start_date, self.end_date, now)
    }
}

/// Fields for inserting a price row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductPrice {
    pub product_id: i64,
    pub price: Money,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

// =============================================================================
// Discount
// =============================================================================

/// A percentage discount valid inside `[start_date, end_date]`.
///
/// Discounts can be linked to products through the `discount_products`
/// table, but a chosen discount always applies to the whole sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Discount {
    pub discount_id: i64,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub discount_percentage: DiscountRate,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Discount {
    /// Checks whether `now` falls inside this discount's validity window.
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        pricing::window_contains(self.start_date, self.end_date, now)
    }
}

/// Fields for inserting a discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiscount {
    pub name: String,
    pub description: String,
    pub discount_percentage: DiscountRate,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

// =============================================================================
// Payment Status
// =============================================================================

/// The payment status of a sale.
///
/// Stored as the literal strings `"In Progress"` and `"Completed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaymentStatus {
    /// Items are still being rung up.
    #[serde(rename = "In Progress")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "In Progress"))]
    InProgress,
    /// Paid and persisted with a receipt.
    #[serde(rename = "Completed")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Completed"))]
    Completed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::InProgress
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::InProgress => f.write_str("In Progress"),
            PaymentStatus::Completed => f.write_str("Completed"),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale. Only completed sales ever reach the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub sale_id: i64,
    pub date: DateTime<Utc>,
    /// Final amount charged, after the discount.
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub total_price: Money,
    /// Amount taken off by the discount (zero without one).
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub discount: Money,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A persisted line item.
/// Uses snapshot pattern to freeze the unit price at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub item_id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub price: Money,
}

impl SaleItem {
    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// The immutable record issued once a sale is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub receipt_id: i64,
    pub sale_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub total_price: Money,
    pub issued_date: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_status_default_and_display() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::InProgress);
        assert_eq!(PaymentStatus::InProgress.to_string(), "In Progress");
        assert_eq!(PaymentStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_discount_window() {
        let discount = Discount {
            discount_id: 1,
            name: "Carta Magnit".to_string(),
            description: "3% and bonusi".to_string(),
            discount_percentage: DiscountRate::new(dec!(3.0)).unwrap(),
            start_date: Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2077, 2, 1, 0, 0, 0).unwrap(),
        };

        assert!(discount.is_active_at(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()));
        assert!(!discount.is_active_at(Utc.with_ymd_and_hms(2019, 1, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_sale_item_line_total() {
        let item = SaleItem {
            item_id: 1,
            sale_id: 1,
            product_id: 1,
            quantity: 2,
            price: Money::from_decimal(dec!(49.99)),
        };
        assert_eq!(item.line_total().amount(), dec!(99.98));
    }
}
