//! # Pricing Rules
//!
//! Validity windows and the policy that picks one price when several
//! overlap.
//!
//! ## Active Price Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product 1 prices                         now = 2024-06-15             │
//! │                                                                         │
//! │  #1  49.99  [2024-01-01 ─────────────────────── 2024-12-31]  active    │
//! │  #2  44.99        [2024-06-01 ──── 2024-06-30]              active ★   │
//! │  #3  54.99                                 [2025-01-01 ── ...]  future │
//! │                                                                         │
//! │  Rule: among active rows, the one that STARTED most recently wins.     │
//! │        Equal start dates: the highest price_id (newest row) wins.      │
//! │  Result: #2 (44.99)                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both window bounds are inclusive.

use chrono::{DateTime, Utc};

use crate::types::{Discount, ProductPrice};

/// Checks whether `now` lies inside `[start, end]` (inclusive).
#[inline]
pub fn window_contains(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start <= now && now <= end
}

/// Picks the price that applies at `now`, if any.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use till_core::pricing::select_active_price;
/// use till_core::{Money, ProductPrice};
///
/// let expired = ProductPrice {
///     price_id: 1,
///     product_id: 1,
///     price: "10.00".parse::<Money>().unwrap(),
///     start_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
///     end_date: Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap(),
/// };
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// assert!(select_active_price(&[expired], now).is_none());
/// ```
pub fn select_active_price(prices: &[ProductPrice], now: DateTime<Utc>) -> Option<&ProductPrice> {
    prices
        .iter()
        .filter(|p| p.is_active_at(now))
        .max_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.price_id.cmp(&b.price_id))
        })
}

/// Filters discounts down to those valid at `now`, ordered by id.
///
/// The ordering is what gives the discount menu stable numbering.
pub fn active_discounts(discounts: Vec<Discount>, now: DateTime<Utc>) -> Vec<Discount> {
    let mut active: Vec<Discount> = discounts
        .into_iter()
        .filter(|d| d.is_active_at(now))
        .collect();
    active.sort_by_key(|d| d.discount_id);
    active
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{DiscountRate, Money};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn price(price_id: i64, amount: Money, start: DateTime<Utc>, end: DateTime<Utc>) -> ProductPrice {
        ProductPrice {
            price_id,
            product_id: 1,
            price: amount,
            start_date: start,
            end_date: end,
        }
    }

    fn discount(discount_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Discount {
        Discount {
            discount_id,
            name: format!("Discount {}", discount_id),
            description: String::new(),
            discount_percentage: DiscountRate::new(dec!(5)).unwrap(),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let start = at(2024, 1, 1);
        let end = at(2024, 12, 31);
        assert!(window_contains(start, end, start));
        assert!(window_contains(start, end, end));
        assert!(!window_contains(start, end, at(2025, 1, 1)));
        assert!(!window_contains(start, end, at(2023, 12, 31)));
    }

    #[test]
    fn test_most_recently_started_price_wins() {
        let prices = vec![
            price(1, Money::from_decimal(dec!(49.99)), at(2024, 1, 1), at(2024, 12, 31)),
            price(2, Money::from_decimal(dec!(44.99)), at(2024, 6, 1), at(2024, 6, 30)),
            price(3, Money::from_decimal(dec!(54.99)), at(2025, 1, 1), at(2025, 12, 31)),
        ];

        let active = select_active_price(&prices, at(2024, 6, 15)).unwrap();
        assert_eq!(active.price_id, 2);

        let active = select_active_price(&prices, at(2024, 7, 15)).unwrap();
        assert_eq!(active.price_id, 1);
    }

    #[test]
    fn test_same_start_prefers_newest_row() {
        let prices = vec![
            price(7, Money::from_decimal(dec!(1.00)), at(2024, 1, 1), at(2024, 12, 31)),
            price(9, Money::from_decimal(dec!(2.00)), at(2024, 1, 1), at(2024, 12, 31)),
            price(8, Money::from_decimal(dec!(3.00)), at(2024, 1, 1), at(2024, 12, 31)),
        ];
        assert_eq!(select_active_price(&prices, at(2024, 3, 1)).unwrap().price_id, 9);
    }

    #[test]
    fn test_no_active_price() {
        let prices = vec![price(1, Money::from_decimal(dec!(49.99)), at(2024, 1, 1), at(2024, 12, 31))];
        assert!(select_active_price(&prices, at(2026, 10, 16)).is_none());
        assert!(select_active_price(&[], at(2026, 10, 16)).is_none());
    }

    #[test]
    fn test_active_discounts_filters_and_orders() {
        let discounts = vec![
            discount(5, at(2019, 2, 1), at(2077, 2, 1)),
            discount(2, at(2020, 1, 1), at(2021, 1, 1)),
            discount(3, at(2026, 1, 1), at(2026, 12, 31)),
        ];

        let active = active_discounts(discounts, at(2026, 10, 16));
        let ids: Vec<i64> = active.iter().map(|d| d.discount_id).collect();
        assert_eq!(ids, vec![3, 5]);
    }
}
