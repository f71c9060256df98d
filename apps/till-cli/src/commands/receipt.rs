//! # Receipt Commands
//!
//! Menu option 8.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::AppResult;
use crate::workflow::SaleWorkflow;

/// Timestamp layout used when printing receipts.
pub const ISSUED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prints every persisted receipt.
pub async fn list_receipts<R: BufRead, W: Write>(
    workflow: &SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let receipts = workflow.list_receipts().await?;

    if receipts.is_empty() {
        return console.say("No receipts found.");
    }

    for receipt in &receipts {
        console.say(format!(
            "Receipt ID: {}, Sale ID: {}, Total Price: {}, Issued Date: {}",
            receipt.receipt_id,
            receipt.sale_id,
            receipt.total_price,
            receipt.issued_date.format(ISSUED_DATE_FORMAT)
        ))?;
    }
    Ok(())
}
