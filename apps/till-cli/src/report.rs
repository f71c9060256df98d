//! # Report
//!
//! `till report`: a read-only dump of the reference data and the receipts
//! issued so far.
//!
//! ```text
//! Products
//!   1  Coffee Beans  Whole beans, 1kg  (packs: 1)
//! Discounts
//!   1  Carta Magnit  3%  2019-02-01 .. 2077-02-01  products: 2, 3
//! Receipts
//!   1  sale 1  $96.98  2026-10-16 09:15:02
//! Schema: 1/1 migrations applied
//! ```

use std::io::Write;
use tracing::info;

use crate::commands::receipt::ISSUED_DATE_FORMAT;
use crate::error::AppResult;
use crate::system::SaleSystem;

const WINDOW_DATE_FORMAT: &str = "%Y-%m-%d";

fn join_ids<T: ToString>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Writes the full report to `out`.
pub async fn write_report<W: Write>(system: &SaleSystem, out: &mut W) -> AppResult<()> {
    let products = system.list_products().await?;
    let discounts = system.all_discounts().await?;
    let receipts = system.list_receipts().await?;

    info!(
        products = products.len(),
        discounts = discounts.len(),
        receipts = receipts.len(),
        "Writing report"
    );

    writeln!(out, "Products")?;
    if products.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for product in &products {
        let packs: Vec<i64> = system
            .product_units(product.product_id)
            .await?
            .iter()
            .map(|u| u.quantity)
            .collect();
        writeln!(
            out,
            "  {}  {}  {}  (packs: {})",
            product.product_id,
            product.name,
            product.description,
            join_ids(&packs)
        )?;
    }

    writeln!(out, "Discounts")?;
    if discounts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for discount in &discounts {
        let linked = system.discount_products(discount.discount_id).await?;
        writeln!(
            out,
            "  {}  {}  {}  {} .. {}  products: {}",
            discount.discount_id,
            discount.name,
            discount.discount_percentage,
            discount.start_date.format(WINDOW_DATE_FORMAT),
            discount.end_date.format(WINDOW_DATE_FORMAT),
            join_ids(&linked)
        )?;
    }

    writeln!(out, "Receipts")?;
    if receipts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for receipt in &receipts {
        writeln!(
            out,
            "  {}  sale {}  {}  {}",
            receipt.receipt_id,
            receipt.sale_id,
            receipt.total_price,
            receipt.issued_date.format(ISSUED_DATE_FORMAT)
        )?;
    }

    let (known, applied) = system.database().migration_status().await?;
    writeln!(out, "Schema: {}/{} migrations applied", applied, known)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{empty_system, seeded_system};
    use crate::workflow::SaleWorkflow;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_empty_report() {
        let (system, _) = empty_system().await;
        let mut out = Vec::new();

        write_report(&system, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Products\n  (none)\nDiscounts\n  (none)\nReceipts\n  (none)\nSchema: 1/1 migrations applied\n"
        );
    }

    #[tokio::test]
    async fn test_report_lists_everything() {
        let (system, fx) = seeded_system().await;
        let mut workflow = SaleWorkflow::new(system.clone());
        let now = Utc::now();
        workflow.start_sale().unwrap();
        workflow.add_item(fx.milk, 3, now).await.unwrap();
        let completed_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 15, 2).unwrap();
        workflow.complete_sale("Cash", completed_at).await.unwrap();

        let mut out = Vec::new();
        write_report(&system, &mut out).await.unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(report.contains(&format!(
            "  {}  Milk  Milk description  (packs: 6)\n",
            fx.milk
        )));
        assert!(report.contains(&format!(
            "  {}  Coffee Beans  Coffee Beans description  (packs: -)\n",
            fx.coffee
        )));
        assert!(report.contains("Carta Magnit  3%  "));
        assert!(report.contains(&format!("products: {}\n", fx.milk)));
        assert!(report.contains(&format!(
            "  {}  Spring Sale  10%  2020-01-01 .. 2020-12-31  products: -\n",
            fx.expired_discount
        )));
        assert!(report.contains("$3.60  2026-10-16 09:15:02\n"));
    }
}
