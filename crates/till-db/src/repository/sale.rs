//! # Sale Repository
//!
//! Persists completed sales. A sale never touches the database while it
//! is in progress; it arrives here once, fully built, as a
//! [`CompletedSale`].
//!
//! ## Completion Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  record_completed() - ONE transaction                   │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    INSERT INTO sales ...        → sale_id = last_insert_rowid()        │
//! │    INSERT INTO sale_items ...   × N   (each stamped with sale_id)      │
//! │    INSERT INTO receipts ...     (sale_id, total_price = sale total)    │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure before COMMIT rolls everything back: no orphaned sale     │
//! │  without a receipt, no receipt without its items.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use till_core::{CompletedSale, Receipt, Sale, SaleItem};

/// Everything `record_completed` wrote, with generated ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSale {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub receipt: Receipt,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Writes a completed sale, its line items and its receipt atomically.
    pub async fn record_completed(&self, completed: &CompletedSale) -> DbResult<RecordedSale> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (date, total_price, discount, payment_method, payment_status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(completed.date)
        .bind(completed.total_price.amount().to_string())
        .bind(completed.discount_amount.amount().to_string())
        .bind(&completed.payment_method)
        .bind(completed.payment_status)
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();
        debug!(sale_id, items = completed.items.len(), "Inserted sale");

        let mut items = Vec::with_capacity(completed.items.len());
        for line in &completed.items {
            let result = sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price.amount().to_string())
            .execute(&mut *tx)
            .await?;

            items.push(SaleItem {
                item_id: result.last_insert_rowid(),
                sale_id,
                product_id: line.product_id,
                quantity: line.quantity,
                price: line.unit_price,
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO receipts (sale_id, total_price, issued_date)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(sale_id)
        .bind(completed.total_price.amount().to_string())
        .bind(completed.date)
        .execute(&mut *tx)
        .await?;

        let receipt_id = result.last_insert_rowid();

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            sale_id,
            receipt_id,
            total = %completed.total_price.amount(),
            discount = %completed.discount_amount.amount(),
            "Sale recorded"
        );

        Ok(RecordedSale {
            sale: Sale {
                sale_id,
                date: completed.date,
                total_price: completed.total_price,
                discount: completed.discount_amount,
                payment_method: completed.payment_method.clone(),
                payment_status: completed.payment_status,
            },
            items,
            receipt: Receipt {
                receipt_id,
                sale_id,
                total_price: completed.total_price,
                issued_date: completed.date,
            },
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, sale_id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT sale_id, date, total_price, discount, payment_method, payment_status
            FROM sales
            WHERE sale_id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT item_id, sale_id, product_id, quantity, price
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY item_id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts persisted sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts persisted line items across all sales.
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
