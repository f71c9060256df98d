//! # Sale System
//!
//! Read-side façade over the database: the lookups the workflow, the menu
//! and the report need, plus the one write (recording a completed sale).
//!
//! ```text
//! SaleWorkflow / menu / report
//!          │
//!          ▼
//!     SaleSystem ──► db.products() / db.prices() / db.discounts()
//!                    db.sales() / db.receipts()
//! ```

use chrono::{DateTime, Utc};
use till_core::{CompletedSale, Discount, Product, ProductPrice, ProductUnit, Receipt};
use till_db::{Database, DbResult, RecordedSale};

/// Query façade used by the sale workflow.
#[derive(Debug, Clone)]
pub struct SaleSystem {
    db: Database,
}

impl SaleSystem {
    pub fn new(db: Database) -> Self {
        SaleSystem { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Every product, ordered by id.
    pub async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.db.products().list().await
    }

    /// Discounts valid at `now`, ordered by id.
    pub async fn list_discounts(&self, now: DateTime<Utc>) -> DbResult<Vec<Discount>> {
        self.db.discounts().list_active(now).await
    }

    /// Every discount regardless of its window.
    pub async fn all_discounts(&self) -> DbResult<Vec<Discount>> {
        self.db.discounts().list().await
    }

    pub async fn product(&self, product_id: i64) -> DbResult<Option<Product>> {
        self.db.products().get_by_id(product_id).await
    }

    pub async fn product_units(&self, product_id: i64) -> DbResult<Vec<ProductUnit>> {
        self.db.products().units(product_id).await
    }

    /// The price of a product that applies at `now`.
    pub async fn active_price(
        &self,
        product_id: i64,
        now: DateTime<Utc>,
    ) -> DbResult<Option<ProductPrice>> {
        self.db.prices().active_price(product_id, now).await
    }

    pub async fn discount_products(&self, discount_id: i64) -> DbResult<Vec<i64>> {
        self.db.discounts().linked_product_ids(discount_id).await
    }

    /// Every issued receipt, oldest first.
    pub async fn list_receipts(&self) -> DbResult<Vec<Receipt>> {
        self.db.receipts().list().await
    }

    /// Persists a completed sale with its items and receipt.
    pub async fn record_sale(&self, sale: &CompletedSale) -> DbResult<RecordedSale> {
        self.db.sales().record_completed(sale).await
    }
}
