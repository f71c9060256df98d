//! # Discount Repository
//!
//! Database operations for discounts and the discount ↔ product
//! association.
//!
//! The association is kept and reported, but a discount picked at the till
//! always applies to the whole sale.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use till_core::pricing::active_discounts;
use till_core::validation::{validate_required, validate_window};
use till_core::{Discount, NewDiscount};

/// Repository for discount database operations.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Lists every discount, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(
            r#"
            SELECT discount_id, name, description, discount_percentage, start_date, end_date
            FROM discounts
            ORDER BY discount_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(discounts)
    }

    /// Lists the discounts valid at `now`, ordered by id.
    ///
    /// The order is what numbers the "Available Discounts" menu.
    pub async fn list_active(&self, now: DateTime<Utc>) -> DbResult<Vec<Discount>> {
        let active = active_discounts(self.list().await?, now);
        debug!(count = active.len(), "Listed active discounts");
        Ok(active)
    }

    /// Inserts a discount and returns it with its generated id.
    pub async fn insert(&self, discount: &NewDiscount) -> DbResult<Discount> {
        validate_required("name", &discount.name)?;
        validate_window("discount", discount.start_date, discount.end_date)?;
        debug!(name = %discount.name, rate = %discount.discount_percentage, "Inserting discount");

        let result = sqlx::query(
            r#"
            INSERT INTO discounts (name, description, discount_percentage, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&discount.name)
        .bind(&discount.description)
        .bind(discount.discount_percentage.percent().to_string())
        .bind(discount.start_date)
        .bind(discount.end_date)
        .execute(&self.pool)
        .await?;

        Ok(Discount {
            discount_id: result.last_insert_rowid(),
            name: discount.name.clone(),
            description: discount.description.clone(),
            discount_percentage: discount.discount_percentage,
            start_date: discount.start_date,
            end_date: discount.end_date,
        })
    }

    /// Associates a discount with a product.
    pub async fn link_product(&self, discount_id: i64, product_id: i64) -> DbResult<()> {
        sqlx::query("INSERT INTO discount_products (discount_id, product_id) VALUES (?1, ?2)")
            .bind(discount_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Ids of the products associated with a discount, ascending.
    pub async fn linked_product_ids(&self, discount_id: i64) -> DbResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT product_id FROM discount_products WHERE discount_id = ?1 ORDER BY product_id",
        )
        .bind(discount_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use till_core::{DiscountRate, NewProduct};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn carta_magnit() -> NewDiscount {
        NewDiscount {
            name: "Carta Magnit".to_string(),
            description: "3% and bonusi".to_string(),
            discount_percentage: DiscountRate::new(dec!(3.0)).unwrap(),
            start_date: at(2019, 2, 1),
            end_date: at(2077, 2, 1),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.discounts();

        let magnit = repo.insert(&carta_magnit()).await.unwrap();
        let mut expired = carta_magnit();
        expired.name = "Spring".to_string();
        expired.start_date = at(2020, 3, 1);
        expired.end_date = at(2020, 5, 31);
        repo.insert(&expired).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);

        let active = repo.list_active(at(2026, 10, 16)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].discount_id, magnit.discount_id);
        assert_eq!(active[0].discount_percentage.percent(), dec!(3.0));
        assert_eq!(active[0].description, "3% and bonusi");
    }

    #[tokio::test]
    async fn test_linked_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let discount = db.discounts().insert(&carta_magnit()).await.unwrap();

        let mut ids = Vec::new();
        for name in ["Milk", "Bread"] {
            let product = db
                .products()
                .insert(&NewProduct {
                    name: name.to_string(),
                    description: String::new(),
                    category: "Grocery".to_string(),
                    unit: "pcs".to_string(),
                })
                .await
                .unwrap();
            ids.push(product.product_id);
        }

        for id in ids.iter().rev() {
            db.discounts().link_product(discount.discount_id, *id).await.unwrap();
        }

        assert_eq!(
            db.discounts().linked_product_ids(discount.discount_id).await.unwrap(),
            ids
        );

        let err = db
            .discounts()
            .link_product(discount.discount_id, ids[0])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
