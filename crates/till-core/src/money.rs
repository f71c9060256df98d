//! # Money Module
//!
//! Provides the `Money` and `DiscountRate` types for handling monetary
//! values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In f64:                                                                │
//! │    49.99 × 2 × 0.97 = 96.98060000000001  ❌ WRONG!                      │
//! │                                                                         │
//! │  With integer cents:                                                    │
//! │    3% of 99.98 = 2.9994 → 300 cents     ❌ receipt off by 0.0006        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    99.98 × 3 / 100 = 2.9994 exactly                                    │
//! │    99.98 − 2.9994  = 96.9806 exactly  (stored as TEXT, never REAL)     │
//! │                                                                         │
//! │  Rounding happens only when printing: Display shows $96.98             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use std::str::FromStr;
//! use till_core::money::Money;
//!
//! let price = Money::from_str("10.99").unwrap();
//! let doubled = price * 2;            // 21.98
//! assert_eq!(doubled.to_string(), "$21.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: sub-cent precision survives percentage discounts
/// - **Single field tuple struct**: zero-cost wrapper, arithmetic stays typed
/// - **TEXT in SQLite**: `"96.9806"` round-trips without loss
///
/// ## Where Money is Used
/// ```text
/// ProductPrice.price ──► SaleLine.unit_price ──► SaleLine.line_total
///                                                      │
///                            SaleDraft.total ◄─────────┘
///                                  │
///                  discount = total.percentage(rate)
///                                  │
///                 Sale.total_price = total − discount ──► Receipt.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use std::str::FromStr;
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_str("2.99").unwrap();
    /// assert_eq!(unit_price.multiply_quantity(3).to_string(), "$8.97");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Like [`Money::multiply_quantity`], but `None` when the product does
    /// not fit in a `Decimal`.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use std::str::FromStr;
    /// use till_core::money::{DiscountRate, Money};
    ///
    /// let total = Money::from_str("99.98").unwrap();
    /// let rate = DiscountRate::from_str("3").unwrap();
    /// assert_eq!(total.percentage(rate).amount().to_string(), "2.9994");
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        // The factor is at most 1, so the product never exceeds the amount.
        Money(self.0 * (rate.percent() / Decimal::ONE_HUNDRED))
    }

    /// Subtracts `rate` percent from this amount and returns the remainder.
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.percentage(rate)
    }

    /// The amount rounded half away from zero to whole cents, for display.
    pub fn rounded_to_cents(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money rounded to cents with a leading currency sign.
///
/// ## Note
/// Display rounds; storage never does. Use [`Money::amount`] for the
/// exact value.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded_to_cents();
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        write!(f, "{}${}", sign, rounded.abs())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Decodes the TEXT column representation used by till-db.
impl TryFrom<String> for Money {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount expressed in percent (3 = 3% off).
///
/// Always within 0..=100; construction through [`DiscountRate::new`],
/// `FromStr` or `TryFrom<String>` enforces the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Creates a rate from a percentage, rejecting values outside 0..=100.
    pub fn new(percent: Decimal) -> Result<Self, ValidationError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "discount_percentage".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountRate(percent))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl FromStr for DiscountRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let percent =
            Decimal::from_str(s.trim()).map_err(|e| ValidationError::InvalidFormat {
                field: "discount_percentage".to_string(),
                reason: e.to_string(),
            })?;
        DiscountRate::new(percent)
    }
}

impl TryFrom<String> for DiscountRate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
