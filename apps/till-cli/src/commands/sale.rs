//! # Sale Commands
//!
//! Menu options 2 through 7.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  2. start   ┌──────────┐  7. complete  ┌──────────────┐  │
//! │  │  NoSale  │────────────►│ In       │──────────────►│ Receipt ID N │  │
//! │  │          │             │ Progress │  (payment)    │ (back to     │  │
//! │  └──────────┘             └──────────┘               │  NoSale)     │  │
//! │       ▲                        │  ▲                  └──────────────┘  │
//! │       │       6. cancel        │  │ 3. add                              │
//! │       └────────────────────────┘  │ 4. remove                           │
//! │                                   │ 5. discount                         │
//! │                                   └──────────                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every prompt is answered on its own line. A product id that fails to
//! parse is rejected before the quantity is asked for.

use chrono::{DateTime, Utc};
use std::io::{BufRead, Write};

use till_core::validation::{parse_integer, parse_selection};

use crate::console::Console;
use crate::error::AppResult;
use crate::workflow::SaleWorkflow;

/// 2. Start Sale
pub fn start_sale<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    workflow.start_sale()?;
    console.say("New sale started.")
}

/// 3. Add Item to Sale
///
/// ```text
/// Enter Product ID: 1
/// Enter Quantity: 2
/// Added 2 bag of Coffee Beans to the sale.
/// ```
pub async fn add_item<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    workflow.require_sale()?;

    let product_id = parse_integer(&console.prompt("Enter Product ID: ")?)?;
    let quantity = parse_integer(&console.prompt("Enter Quantity: ")?)?;

    let line = workflow.add_item(product_id, quantity, now).await?;
    console.say(format!(
        "Added {} {} of {} to the sale.",
        line.quantity, line.unit, line.name
    ))
}

/// 4. Remove Item from Sale
pub fn remove_item<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let lines = workflow.removable_lines()?;
    let count = lines.len();

    console.say("Current Sale Items:")?;
    for (index, line) in lines.iter().enumerate() {
        console.say(format!(
            "{}. {} - Quantity: {}, Price per unit: {}",
            index + 1,
            line.name,
            line.quantity,
            line.unit_price
        ))?;
    }

    let position = parse_selection(&console.prompt("Select an item to remove: ")?, count)?;
    workflow.remove_item(position)?;
    console.say("Item removed from sale.")
}

/// 5. Apply Discount
///
/// ```text
/// Available Discounts:
/// 1. Carta Magnit - 3% and bonusi (3% off)
/// Select a discount: 1
/// Applied discount: Carta Magnit
/// ```
pub async fn apply_discount<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let discounts = workflow.available_discounts(now).await?;

    console.say("Available Discounts:")?;
    for (index, discount) in discounts.iter().enumerate() {
        console.say(format!(
            "{}. {} - {} ({} off)",
            index + 1,
            discount.name,
            discount.description,
            discount.discount_percentage
        ))?;
    }

    let position = parse_selection(&console.prompt("Select a discount: ")?, discounts.len())?;
    let applied = workflow.apply_discount(&discounts[position - 1])?;
    console.say(format!("Applied discount: {}", applied.name))
}

/// 6. Cancel Sale
pub fn cancel_sale<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    workflow.cancel_sale()?;
    console.say("Sale canceled.")
}

/// 7. Complete Sale
///
/// ```text
/// Total price after discount: $96.98
/// Enter Payment Method (e.g., Cash, Credit Card): Cash
/// Sale completed. Receipt ID: 1
/// ```
pub async fn complete_sale<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let amount_due = workflow.amount_due()?;
    console.say(format!("Total price after discount: {}", amount_due))?;

    let payment_method = console.prompt("Enter Payment Method (e.g., Cash, Credit Card): ")?;
    let recorded = workflow.complete_sale(&payment_method, now).await?;

    console.say(format!("Sale completed. Receipt ID: {}", recorded.receipt.receipt_id))
}
