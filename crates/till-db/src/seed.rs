//! # Sample Data
//!
//! Reference data for development and demos, loaded by the `seed` binary.
//!
//! ## Loading
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── products already present? ──yes──► ROLLBACK, Skipped            │
//! │    │                                                                    │
//! │    ├── Coffee Beans + expired 2024 price                               │
//! │    ├── grocery products + 2025-2030 prices + pack sizes                │
//! │    ├── Carta Magnit discount, linked to the dairy products             │
//! │    │                                                                    │
//! │  COMMIT ─────────────────────────────────────────────► Loaded          │
//! │                                                                         │
//! │  Any failure drops the transaction: nothing is written, and the next   │
//! │  run starts from an empty catalog again.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use till_core::DiscountRate;

/// (name, description, category, unit, price in cents, pack sizes)
const PRODUCTS: &[(&str, &str, &str, &str, i64, &[i64])] = &[
    ("Milk", "Whole milk, 1L", "Dairy", "bottle", 120, &[1, 6]),
    ("Cheddar", "Aged cheddar, 200g", "Dairy", "block", 385, &[1]),
    ("Bread", "Sourdough loaf", "Bakery", "loaf", 250, &[1]),
    ("Apples", "Red apples", "Produce", "kg", 199, &[1, 5]),
    ("Orange Juice", "Fresh, 1L", "Beverages", "carton", 315, &[1, 4]),
    ("Sparkling Water", "0.5L", "Beverages", "bottle", 89, &[1, 6, 12]),
];

/// What [`load_sample_data`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Everything was written in one transaction.
    Loaded {
        products: usize,
        discount: String,
        linked: usize,
    },
    /// The catalog was not empty; nothing was written.
    Skipped { existing_products: i64 },
}

fn date(y: i32, m: u32, d: u32) -> DbResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .ok_or_else(|| DbError::Internal(format!("invalid date {}-{}-{}", y, m, d)))
}

/// Loads the sample catalog into an empty database, all or nothing.
pub async fn load_sample_data(db: &Database) -> DbResult<SeedOutcome> {
    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let existing_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;
    if existing_products > 0 {
        debug!(existing_products, "Catalog not empty, skipping sample data");
        return Ok(SeedOutcome::Skipped { existing_products });
    }

    // Its only price expired at the end of 2024.
    let coffee =
        insert_product(&mut *tx, "Coffee Beans", "Arabica, 1kg bag", "Grocery", "bag").await?;
    insert_price(
        &mut *tx,
        coffee,
        Decimal::new(4999, 2),
        date(2024, 1, 1)?,
        date(2024, 12, 31)?,
    )
    .await?;
    insert_unit(&mut *tx, coffee, 1).await?;

    let mut dairy = Vec::new();
    for (name, description, category, unit, cents, packs) in PRODUCTS {
        let product_id = insert_product(&mut *tx, name, description, category, unit).await?;
        insert_price(
            &mut *tx,
            product_id,
            Decimal::new(*cents, 2),
            date(2025, 1, 1)?,
            date(2030, 12, 31)?,
        )
        .await?;

        for pack in packs.iter() {
            insert_unit(&mut *tx, product_id, *pack).await?;
        }

        if *category == "Dairy" {
            dairy.push(product_id);
        }
    }

    let rate = DiscountRate::new(Decimal::new(3, 0))?;
    let discount_id = sqlx::query(
        r#"
        INSERT INTO discounts (name, description, discount_percentage, start_date, end_date)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind("Carta Magnit")
    .bind("3% and bonusi")
    .bind(rate.percent().to_string())
    .bind(date(2019, 2, 1)?)
    .bind(date(2077, 2, 1)?)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for product_id in dairy.iter().copied() {
        sqlx::query("INSERT INTO discount_products (discount_id, product_id) VALUES (?1, ?2)")
            .bind(discount_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let outcome = SeedOutcome::Loaded {
        products: PRODUCTS.len() + 1,
        discount: "Carta Magnit".to_string(),
        linked: dairy.len(),
    };
    info!(?outcome, "Sample data loaded");
    Ok(outcome)
}

async fn insert_product(
    conn: &mut SqliteConnection,
    name: &str,
    description: &str,
    category: &str,
    unit: &str,
) -> DbResult<i64> {
    let result = sqlx::query(
        "INSERT INTO products (name, description, category, unit) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(name)
    .bind(description)
    .bind(category)
    .bind(unit)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn insert_price(
    conn: &mut SqliteConnection,
    product_id: i64,
    amount: Decimal,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO product_prices (product_id, price, start_date, end_date)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(product_id)
    .bind(amount.to_string())
    .bind(start_date)
    .bind(end_date)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_unit(conn: &mut SqliteConnection, product_id: i64, quantity: i64) -> DbResult<()> {
    sqlx::query("INSERT INTO product_units (product_id, quantity) VALUES (?1, ?2)")
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_loads_catalog_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let outcome = load_sample_data(&db).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Loaded {
                products: 7,
                discount: "Carta Magnit".to_string(),
                linked: 2,
            }
        );

        let products = db.products().list().await.unwrap();
        assert_eq!(products.len(), 7);
        assert_eq!(products[0].name, "Coffee Beans");

        let now = date(2026, 10, 16).unwrap();
        assert!(db.prices().active_price(products[0].product_id, now).await.unwrap().is_none());
        let milk = db.prices().active_price(products[1].product_id, now).await.unwrap().unwrap();
        assert_eq!(milk.price.amount(), dec!(1.20));

        let discounts = db.discounts().list_active(now).await.unwrap();
        assert_eq!(discounts.len(), 1);
        assert_eq!(
            db.discounts().linked_product_ids(discounts[0].discount_id).await.unwrap(),
            vec![products[1].product_id, products[2].product_id]
        );

        assert_eq!(
            load_sample_data(&db).await.unwrap(),
            SeedOutcome::Skipped { existing_products: 7 }
        );
        assert_eq!(db.products().count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_failure_part_way_writes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "CREATE TRIGGER refuse_links BEFORE INSERT ON discount_products \
             BEGIN SELECT RAISE(ABORT, 'links refused'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = load_sample_data(&db).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)), "{err:?}");
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert!(db.discounts().list().await.unwrap().is_empty());

        sqlx::query("DROP TRIGGER refuse_links")
            .execute(db.pool())
            .await
            .unwrap();
        assert!(matches!(
            load_sample_data(&db).await.unwrap(),
            SeedOutcome::Loaded { products: 7, .. }
        ));
    }
}
