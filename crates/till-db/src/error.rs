//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError::Db (in till-cli) ← Always fatal                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  main() exits non-zero with the error chain on stderr                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::ValidationError;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A second receipt for the same sale
    /// - Linking a discount to the same product twice
    #[error("Duplicate row violates {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing non-existent product_id
    /// - Referencing non-existent sale_id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit of a transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A stored row could not be turned back into a domain value.
    ///
    /// ## When This Occurs
    /// - A money or percentage column holding text that is not a decimal
    /// - A timestamp column that is not RFC 3339
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Reference data rejected before it reached SQLite.
    ///
    /// ## When This Occurs
    /// - Empty product or discount name
    /// - Negative price
    /// - A validity window whose end precedes its start
    #[error("Invalid data: {0}")]
    Invalid(#[from] ValidationError),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → UniqueViolation / ForeignKeyViolation / QueryFailed
/// sqlx::Error::ColumnDecode   → DbError::CorruptRow
/// sqlx::Error::Decode         → DbError::CorruptRow
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>[, <table>.<column>]"
                // "FOREIGN KEY constraint failed"
                if let Some(columns) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        constraint: columns.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DbError::CorruptRow(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use till_core::{DiscountRate, NewDiscount, NewProduct};

    async fn db_with_product() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Milk".to_string(),
                description: String::new(),
                category: "Dairy".to_string(),
                unit: "bottle".to_string(),
            })
            .await
            .unwrap();
        (db, product.product_id)
    }

    #[tokio::test]
    async fn test_unique_violation_names_columns() {
        let (db, product_id) = db_with_product().await;
        let discount = db
            .discounts()
            .insert(&NewDiscount {
                name: "Carta Magnit".to_string(),
                description: String::new(),
                discount_percentage: DiscountRate::new(dec!(3)).unwrap(),
                start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        db.discounts().link_product(discount.discount_id, product_id).await.unwrap();
        let err = db
            .discounts()
            .link_product(discount.discount_id, product_id)
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { constraint } => {
                assert!(constraint.contains("discount_products.product_id"), "{constraint}");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_parent_is_foreign_key_violation() {
        let (db, product_id) = db_with_product().await;

        let err = db.products().insert_unit(product_id + 100, 6).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(db.products().units(product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_money_is_corrupt_row() {
        let (db, product_id) = db_with_product().await;
        sqlx::query(
            "INSERT INTO product_prices (product_id, price, start_date, end_date) \
             VALUES (?, 'twelve', '2025-01-01T00:00:00Z', '2030-01-01T00:00:00Z')",
        )
        .bind(product_id)
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.prices().list_for_product(product_id).await.unwrap_err();

        assert!(matches!(err, DbError::CorruptRow(_)), "{err:?}");
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }
}
