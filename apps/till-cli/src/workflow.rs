//! # Sale Workflow
//!
//! The state machine behind menu options 2-7.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            start_sale                                                   │
//! │   NoSale ─────────────► InProgress(SaleDraft) ──┐ add_item             │
//! │     ▲                        │      │      ▲    │ remove_item          │
//! │     │        cancel_sale     │      │      └────┘ apply_discount       │
//! │     ├────────────────────────┘      │                                   │
//! │     │        complete_sale          │  (Sale + items + Receipt         │
//! │     └───────────────────────────────┘   written in one transaction)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected operation leaves the state exactly as it was.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use till_core::validation::validate_quantity;
use till_core::{AppliedDiscount, CoreError, CoreResult, Discount, Money, Receipt, SaleDraft, SaleLine};
use till_db::RecordedSale;

use crate::error::AppResult;
use crate::system::SaleSystem;

/// Where the workflow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleState {
    NoSale,
    InProgress(SaleDraft),
}

/// Drives one sale at a time over a [`SaleSystem`].
#[derive(Debug)]
pub struct SaleWorkflow {
    system: SaleSystem,
    state: SaleState,
}

impl SaleWorkflow {
    pub fn new(system: SaleSystem) -> Self {
        SaleWorkflow {
            system,
            state: SaleState::NoSale,
        }
    }

    pub fn system(&self) -> &SaleSystem {
        &self.system
    }

    pub fn state(&self) -> &SaleState {
        &self.state
    }

    /// The sale in progress, if any.
    pub fn current(&self) -> Option<&SaleDraft> {
        match &self.state {
            SaleState::InProgress(draft) => Some(draft),
            SaleState::NoSale => None,
        }
    }

    /// The sale in progress, or `NoSaleInProgress`.
    pub fn require_sale(&self) -> CoreResult<&SaleDraft> {
        self.current().ok_or(CoreError::NoSaleInProgress)
    }

    fn require_sale_mut(&mut self) -> CoreResult<&mut SaleDraft> {
        match &mut self.state {
            SaleState::InProgress(draft) => Ok(draft),
            SaleState::NoSale => Err(CoreError::NoSaleInProgress),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Starts an empty sale. Rejected while another sale is in progress.
    pub fn start_sale(&mut self) -> CoreResult<()> {
        if self.current().is_some() {
            return Err(CoreError::SaleAlreadyInProgress);
        }

        self.state = SaleState::InProgress(SaleDraft::new());
        info!("Sale started");
        Ok(())
    }

    /// Adds `quantity` of a product at its currently active price.
    ///
    /// ## Checks (in order)
    /// 1. A sale is in progress
    /// 2. Quantity within 1..=999
    /// 3. The product exists
    /// 4. The product has a price active at `now`
    pub async fn add_item(
        &mut self,
        product_id: i64,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> AppResult<SaleLine> {
        self.require_sale()?;
        validate_quantity(quantity)?;

        let product = self
            .system
            .product(product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let price = self
            .system
            .active_price(product_id, now)
            .await?
            .ok_or(CoreError::NoActivePrice { product_id })?;

        let line = SaleLine::new(&product, &price, quantity);
        let draft = self.require_sale_mut()?;
        draft.add_line(line.clone())?;

        info!(
            product_id,
            quantity,
            unit_price = %line.unit_price.amount(),
            total = %draft.total().amount(),
            "Item added"
        );
        Ok(line)
    }

    /// The lines that can be removed. Errors when there is no sale or it
    /// has no lines.
    pub fn removable_lines(&self) -> CoreResult<&[SaleLine]> {
        let draft = self.require_sale()?;
        if draft.is_empty() {
            return Err(CoreError::EmptySale);
        }
        Ok(draft.lines())
    }

    /// Removes the line at a 1-based position.
    pub fn remove_item(&mut self, position: usize) -> CoreResult<SaleLine> {
        let draft = self.require_sale_mut()?;
        let line = draft.remove_line(position)?;

        info!(
            product_id = line.product_id,
            quantity = line.quantity,
            total = %draft.total().amount(),
            "Item removed"
        );
        Ok(line)
    }

    /// Discounts that can be applied right now.
    pub async fn available_discounts(&self, now: DateTime<Utc>) -> AppResult<Vec<Discount>> {
        self.require_sale()?;

        let discounts = self.system.list_discounts(now).await?;
        if discounts.is_empty() {
            return Err(CoreError::NoActiveDiscounts.into());
        }
        Ok(discounts)
    }

    /// Records the discount to use at completion. The running total is
    /// left alone.
    pub fn apply_discount(&mut self, discount: &Discount) -> CoreResult<AppliedDiscount> {
        let draft = self.require_sale_mut()?;
        let applied = AppliedDiscount::from(discount);
        draft.apply_discount(applied.clone());

        info!(discount_id = applied.discount_id, rate = %applied.rate, "Discount applied");
        Ok(applied)
    }

    /// Discards the sale in progress without touching storage.
    pub fn cancel_sale(&mut self) -> CoreResult<()> {
        if self.current().is_none() {
            return Err(CoreError::NoSaleToClose);
        }

        self.state = SaleState::NoSale;
        info!("Sale canceled");
        Ok(())
    }

    /// What the customer pays if the sale is completed now.
    pub fn amount_due(&self) -> CoreResult<Money> {
        self.current()
            .map(SaleDraft::final_total)
            .ok_or(CoreError::NoSaleToClose)
    }

    /// Finalizes the sale, persists it atomically and returns to `NoSale`.
    ///
    /// The draft stays in place if the write fails.
    pub async fn complete_sale(
        &mut self,
        payment_method: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RecordedSale> {
        let draft = self.current().ok_or(CoreError::NoSaleToClose)?;
        let completed = draft.clone().finalize(payment_method, now);

        debug!(
            items = completed.items.len(),
            subtotal = %completed.subtotal.amount(),
            discount = %completed.discount_amount.amount(),
            "Completing sale"
        );

        let recorded = self.system.record_sale(&completed).await?;
        self.state = SaleState::NoSale;

        info!(
            sale_id = recorded.sale.sale_id,
            receipt_id = recorded.receipt.receipt_id,
            total = %recorded.sale.total_price.amount(),
            "Sale completed"
        );
        Ok(recorded)
    }

    /// All persisted receipts.
    pub async fn list_receipts(&self) -> AppResult<Vec<Receipt>> {
        Ok(self.system.list_receipts().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testing::{seeded_system, Fixture};
    use rust_decimal_macros::dec;

    async fn workflow() -> (SaleWorkflow, Fixture) {
        let (system, fixture) = seeded_system().await;
        (SaleWorkflow::new(system), fixture)
    }

    fn assert_core(err: AppError, expected: &str) {
        assert!(matches!(err, AppError::Core(_)), "unexpected error: {:?}", err);
        assert_eq!(err.to_string(), expected);
    }

    #[tokio::test]
    async fn test_start_sale_twice_leaves_state_unchanged() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();

        wf.start_sale().unwrap();
        wf.add_item(fx.coffee, 2, now).await.unwrap();
        let before = wf.state().clone();

        assert!(matches!(wf.start_sale(), Err(CoreError::SaleAlreadyInProgress)));
        assert_eq!(wf.state(), &before);
    }

    #[tokio::test]
    async fn test_operations_require_a_sale() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();

        assert_core(
            wf.add_item(fx.coffee, 1, now).await.unwrap_err(),
            "No sale in progress. Start a sale first.",
        );
        assert!(matches!(wf.removable_lines(), Err(CoreError::NoSaleInProgress)));
        assert_core(
            wf.available_discounts(now).await.unwrap_err(),
            "No sale in progress. Start a sale first.",
        );
        assert!(matches!(wf.cancel_sale(), Err(CoreError::NoSaleToClose)));
        assert!(matches!(wf.amount_due(), Err(CoreError::NoSaleToClose)));
        assert_core(
            wf.complete_sale("Cash", now).await.unwrap_err(),
            "No sale in progress.",
        );
    }

    #[tokio::test]
    async fn test_add_item_failures_change_nothing() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();
        wf.add_item(fx.milk, 3, now).await.unwrap();
        let before = wf.state().clone();

        assert_core(
            wf.add_item(9999, 1, now).await.unwrap_err(),
            "Product not found.",
        );
        assert_core(
            wf.add_item(fx.expired_tea, 1, now).await.unwrap_err(),
            "No active price for this product.",
        );
        assert!(matches!(
            wf.add_item(fx.coffee, 0, now).await.unwrap_err(),
            AppError::Core(CoreError::Validation(_))
        ));
        assert!(matches!(
            wf.add_item(fx.coffee, 1000, now).await.unwrap_err(),
            AppError::Core(CoreError::Validation(_))
        ));

        assert_eq!(wf.state(), &before);
    }

    #[tokio::test]
    async fn test_running_total_after_add_and_remove() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();

        let line = wf.add_item(fx.coffee, 2, now).await.unwrap();
        assert_eq!(line.name, "Coffee Beans");
        assert_eq!(line.unit, "bag");
        wf.add_item(fx.milk, 1, now).await.unwrap();
        assert_eq!(wf.require_sale().unwrap().total().amount(), dec!(101.18));

        assert!(matches!(wf.remove_item(3), Err(CoreError::InvalidChoice { .. })));
        let removed = wf.remove_item(1).unwrap();
        assert_eq!(removed.product_id, fx.coffee);
        assert_eq!(wf.require_sale().unwrap().total().amount(), dec!(1.20));

        wf.remove_item(1).unwrap();
        assert!(matches!(wf.removable_lines(), Err(CoreError::EmptySale)));
    }

    #[tokio::test]
    async fn test_available_discounts_only_active() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();

        let discounts = wf.available_discounts(now).await.unwrap();
        let ids: Vec<i64> = discounts.iter().map(|d| d.discount_id).collect();
        assert_eq!(ids, vec![fx.carta_magnit]);
        assert!(!ids.contains(&fx.expired_discount));
    }

    #[tokio::test]
    async fn test_no_active_discounts() {
        let (system, _) = crate::testing::empty_system().await;
        let mut wf = SaleWorkflow::new(system);
        wf.start_sale().unwrap();

        assert_core(
            wf.available_discounts(Utc::now()).await.unwrap_err(),
            "No active discounts available.",
        );
    }

    #[tokio::test]
    async fn test_cancel_writes_nothing() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();
        wf.add_item(fx.coffee, 2, now).await.unwrap();

        wf.cancel_sale().unwrap();
        assert_eq!(wf.state(), &SaleState::NoSale);

        let db = wf.system().database();
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert_eq!(db.receipts().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_complete_with_discount() {
        let (mut wf, fx) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();
        wf.add_item(fx.coffee, 2, now).await.unwrap();

        let discounts = wf.available_discounts(now).await.unwrap();
        wf.apply_discount(&discounts[0]).unwrap();
        assert_eq!(wf.require_sale().unwrap().total().amount(), dec!(99.98));
        assert_eq!(wf.amount_due().unwrap().amount(), dec!(96.9806));

        let recorded = wf.complete_sale(" Credit Card ", now).await.unwrap();
        assert_eq!(wf.state(), &SaleState::NoSale);

        assert_eq!(recorded.sale.discount.amount(), dec!(2.9994));
        assert_eq!(recorded.sale.total_price.amount(), dec!(96.9806));
        assert_eq!(recorded.sale.payment_method, "Credit Card");
        assert_eq!(recorded.receipt.total_price.amount(), dec!(96.9806));

        let receipts = wf.list_receipts().await.unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].receipt_id, recorded.receipt.receipt_id);

        let db = wf.system().database();
        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert_eq!(db.sales().count_items().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_complete_empty_sale() {
        let (mut wf, _) = workflow().await;
        let now = Utc::now();
        wf.start_sale().unwrap();

        let recorded = wf.complete_sale("Cash", now).await.unwrap();
        assert!(recorded.items.is_empty());
        assert!(recorded.sale.total_price.is_zero());
        assert!(recorded.sale.discount.is_zero());
    }
}
