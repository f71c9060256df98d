//! # Price Repository
//!
//! Database operations for product prices and their validity windows.
//!
//! ## Active Price Lookup
//! ```text
//! active_price(product_id, now)
//!      │
//!      ├── SELECT every price row of the product
//!      │
//!      └── till_core::pricing::select_active_price(rows, now)
//!              window contains now, most recent start wins
//! ```
//!
//! Window filtering happens in Rust so the overlap policy lives in one
//! place (till-core) and does not depend on how timestamps sort as TEXT.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use till_core::pricing::select_active_price;
use till_core::validation::validate_window;
use till_core::{NewProductPrice, ProductPrice, ValidationError};

/// Repository for product price database operations.
#[derive(Debug, Clone)]
pub struct PriceRepository {
    pool: SqlitePool,
}

impl PriceRepository {
    /// Creates a new PriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceRepository { pool }
    }

    /// Lists every price row of a product, oldest row first.
    pub async fn list_for_product(&self, product_id: i64) -> DbResult<Vec<ProductPrice>> {
        let prices = sqlx::query_as::<_, ProductPrice>(
            r#"
            SELECT price_id, product_id, price, start_date, end_date
            FROM product_prices
            WHERE product_id = ?1
            ORDER BY price_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    /// Returns the price of a product that applies at `now`, if any.
    pub async fn active_price(
        &self,
        product_id: i64,
        now: DateTime<Utc>,
    ) -> DbResult<Option<ProductPrice>> {
        let prices = self.list_for_product(product_id).await?;
        let active = select_active_price(&prices, now).cloned();

        debug!(
            product_id,
            candidates = prices.len(),
            price_id = ?active.as_ref().map(|p| p.price_id),
            "Resolved active price"
        );

        Ok(active)
    }

    /// Inserts a price row and returns it with its generated id.
    pub async fn insert(&self, price: &NewProductPrice) -> DbResult<ProductPrice> {
        if price.price.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            }
            .into());
        }
        validate_window("price", price.start_date, price.end_date)?;
        debug!(product_id = price.product_id, price = %price.price, "Inserting price");

        let result = sqlx::query(
            r#"
            INSERT INTO product_prices (product_id, price, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(price.product_id)
        .bind(price.price.amount().to_string())
        .bind(price.start_date)
        .bind(price.end_date)
        .execute(&self.pool)
        .await?;

        Ok(ProductPrice {
            price_id: result.last_insert_rowid(),
            product_id: price.product_id,
            price: price.price,
            start_date: price.start_date,
            end_date: price.end_date,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use till_core::{Money, NewProduct};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Coffee Beans".to_string(),
                description: "Arabica".to_string(),
                category: "Grocery".to_string(),
                unit: "bag".to_string(),
            })
            .await
            .unwrap();
        (db, product.product_id)
    }

    fn new_price(product_id: i64, amount: Money, start: DateTime<Utc>, end: DateTime<Utc>) -> NewProductPrice {
        NewProductPrice {
            product_id,
            price: amount,
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn test_price_round_trips_exactly() {
        let (db, product_id) = setup().await;
        let repo = db.prices();

        repo.insert(&new_price(
            product_id,
            Money::from_decimal(dec!(49.99)),
            at(2024, 1, 1),
            at(2024, 12, 31),
        ))
        .await
        .unwrap();

        let prices = repo.list_for_product(product_id).await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].price.amount(), dec!(49.99));
        assert_eq!(prices[0].start_date, at(2024, 1, 1));
        assert_eq!(prices[0].end_date, at(2024, 12, 31));
    }

    #[tokio::test]
    async fn test_active_price_follows_windows() {
        let (db, product_id) = setup().await;
        let repo = db.prices();

        repo.insert(&new_price(product_id, Money::from_decimal(dec!(49.99)), at(2024, 1, 1), at(2024, 12, 31)))
            .await
            .unwrap();
        let promo = repo
            .insert(&new_price(product_id, Money::from_decimal(dec!(44.99)), at(2024, 6, 1), at(2024, 6, 30)))
            .await
            .unwrap();

        let active = repo.active_price(product_id, at(2024, 6, 15)).await.unwrap().unwrap();
        assert_eq!(active.price_id, promo.price_id);

        let active = repo.active_price(product_id, at(2024, 3, 1)).await.unwrap().unwrap();
        assert_eq!(active.price.amount(), dec!(49.99));

        assert!(repo.active_price(product_id, at(2025, 1, 2)).await.unwrap().is_none());
        assert!(repo.active_price(9999, at(2024, 6, 15)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_rows() {
        let (db, product_id) = setup().await;
        let repo = db.prices();

        let inverted = repo
            .insert(&new_price(product_id, Money::from_decimal(dec!(1)), at(2024, 12, 31), at(2024, 1, 1)))
            .await;
        assert!(matches!(inverted, Err(DbError::Invalid(_))));

        let negative = repo
            .insert(&new_price(product_id, Money::from_decimal(dec!(-1)), at(2024, 1, 1), at(2024, 12, 31)))
            .await;
        assert!(matches!(negative, Err(DbError::Invalid(_))));

        assert!(repo.list_for_product(product_id).await.unwrap().is_empty());
    }
}
