//! # Receipt Repository
//!
//! Read access to issued receipts. Receipts are only ever written by
//! [`SaleRepository::record_completed`](crate::SaleRepository::record_completed).

use sqlx::SqlitePool;

use crate::error::DbResult;
use till_core::Receipt;

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Lists every receipt, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT receipt_id, sale_id, total_price, issued_date
            FROM receipts
            ORDER BY receipt_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    /// Gets the receipt issued for a sale.
    pub async fn get_by_sale(&self, sale_id: i64) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT receipt_id, sale_id, total_price, issued_date
            FROM receipts
            WHERE sale_id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Counts issued receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
