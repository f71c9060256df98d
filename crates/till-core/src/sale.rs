//! # Sale Draft
//!
//! The in-progress sale a cashier builds up before it is written to storage.
//!
//! ## Sale Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Draft Operations                                │
//! │                                                                         │
//! │  Menu Action              Draft Method            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  Start Sale ─────────────► SaleDraft::new() ────► total = 0, no items  │
//! │                                                                         │
//! │  Add Item ───────────────► add_line() ──────────► items.push(line)     │
//! │                                                   total += price × qty │
//! │                                                                         │
//! │  Remove Item ────────────► remove_line(n) ──────► items.remove(n - 1)  │
//! │                                                   total −= price × qty │
//! │                                                                         │
//! │  Apply Discount ─────────► apply_discount() ────► discount = Some(..)  │
//! │                                                   (total untouched)    │
//! │                                                                         │
//! │  Complete Sale ──────────► finalize() ──────────► CompletedSale        │
//! │                                                   (ready to persist)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `total` always equals the sum of `unit_price × quantity` over the lines
//! currently in the draft. Every mutation keeps it that way incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{DiscountRate, Money};
use crate::types::{Discount, PaymentStatus, Product, ProductPrice};
use crate::validation::validate_quantity;
use crate::MAX_SALE_LINES;

// =============================================================================
// Sale Line
// =============================================================================

/// A line in the draft.
///
/// ## Design Notes
/// - `unit_price`: frozen copy of the price active when the line was added.
///   Later price changes never reach an in-progress sale.
/// - `name` / `unit`: kept for the remove list and the "Added ..." message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: i64,
    pub name: String,
    pub unit: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl SaleLine {
    /// Builds a line from a product and the price active for it right now.
    pub fn new(product: &Product, price: &ProductPrice, quantity: i64) -> Self {
        SaleLine {
            product_id: product.product_id,
            name: product.name.clone(),
            unit: product.unit.clone(),
            unit_price: price.price,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The discount chosen for a draft, captured at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub discount_id: i64,
    pub name: String,
    pub rate: DiscountRate,
}

impl From<&Discount> for AppliedDiscount {
    fn from(discount: &Discount) -> Self {
        AppliedDiscount {
            discount_id: discount.discount_id,
            name: discount.name.clone(),
            rate: discount.discount_percentage,
        }
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// A sale that has been started but not yet completed or canceled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    items: Vec<SaleLine>,
    total: Money,
    discount: Option<AppliedDiscount>,
}

impl SaleDraft {
    /// Starts an empty draft: zero total, no items, no discount.
    pub fn new() -> Self {
        SaleDraft {
            items: Vec::new(),
            total: Money::zero(),
            discount: None,
        }
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[SaleLine] {
        &self.items
    }

    /// Running total before any discount.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a line and adds its total to the running total.
    ///
    /// Adding the same product twice yields two lines; the remove list
    /// shows each addition separately.
    ///
    /// ## Errors
    /// - `Validation` if the quantity is outside 1..=999
    /// - `SaleTooLarge` if the draft already holds `MAX_SALE_LINES` lines
    /// - `AmountOverflow` if the line or the new total is out of range
    ///
    /// On error the draft is left exactly as it was.
    pub fn add_line(&mut self, line: SaleLine) -> CoreResult<&SaleLine> {
        validate_quantity(line.quantity)?;

        if self.items.len() >= MAX_SALE_LINES {
            return Err(CoreError::SaleTooLarge {
                max: MAX_SALE_LINES,
            });
        }

        self.total = line
            .unit_price
            .checked_multiply_quantity(line.quantity)
            .and_then(|line_total| self.total.checked_add(line_total))
            .ok_or(CoreError::AmountOverflow)?;
        self.items.push(line);

        // The push above guarantees a last element.
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the line at a 1-based position and subtracts its total.
    ///
    /// ## Errors
    /// - `EmptySale` if there is nothing to remove
    /// - `InvalidChoice` if `position` is outside `1..=len`
    pub fn remove_line(&mut self, position: usize) -> CoreResult<SaleLine> {
        if self.items.is_empty() {
            return Err(CoreError::EmptySale);
        }

        if position == 0 || position > self.items.len() {
            return Err(CoreError::InvalidChoice {
                choice: position as i64,
                max: self.items.len(),
            });
        }

        let line = self.items.remove(position - 1);
        self.total -= line.line_total();
        Ok(line)
    }

    /// Records the discount to apply at completion. A later choice replaces
    /// an earlier one. The running total is not changed.
    pub fn apply_discount(&mut self, discount: AppliedDiscount) {
        self.discount = Some(discount);
    }

    /// Discount amount the draft would get if completed now.
    pub fn discount_amount(&self) -> Money {
        match &self.discount {
            Some(applied) => self.total.percentage(applied.rate),
            None => Money::zero(),
        }
    }

    /// Total the customer pays if completed now.
    pub fn final_total(&self) -> Money {
        self.total - self.discount_amount()
    }

    /// Consumes the draft and produces the record to persist.
    ///
    /// ## Calculation
    /// ```text
    /// subtotal        = Σ unit_price × quantity
    /// discount_amount = subtotal × percentage / 100   (0 without a discount)
    /// total_price     = subtotal − discount_amount
    /// ```
    /// No rounding is applied; the exact values are stored.
    pub fn finalize(self, payment_method: &str, completed_at: DateTime<Utc>) -> CompletedSale {
        let discount_amount = self.discount_amount();
        let total_price = self.total - discount_amount;

        CompletedSale {
            date: completed_at,
            subtotal: self.total,
            discount_amount,
            total_price,
            payment_method: payment_method.trim().to_string(),
            payment_status: PaymentStatus::Completed,
            discount: self.discount,
            items: self.items,
        }
    }
}

impl Default for SaleDraft {
    fn default() -> Self {
        SaleDraft::new()
    }
}

// =============================================================================
// Completed Sale
// =============================================================================

/// A finished sale, not yet persisted. Storage assigns the sale, item and
/// receipt ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSale {
    pub date: DateTime<Utc>,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total_price: Money,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub discount: Option<AppliedDiscount>,
    pub items: Vec<SaleLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================
