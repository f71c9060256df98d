//! # Catalog Commands
//!
//! Menu option 1.

use std::io::{BufRead, Write};
use tracing::debug;

use crate::console::Console;
use crate::error::AppResult;
use crate::workflow::SaleWorkflow;

/// Prints every product, ordered by id.
///
/// ```text
/// Product ID: 1, Name: Coffee Beans, Description: Whole beans, 1kg
/// Product ID: 2, Name: Milk, Description: Whole milk, 1L
/// ```
pub async fn list_products<R: BufRead, W: Write>(
    workflow: &SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let products = workflow.system().list_products().await?;
    debug!(count = products.len(), "list_products command");

    if products.is_empty() {
        return console.say("No products found.");
    }

    for product in &products {
        console.say(format!(
            "Product ID: {}, Name: {}, Description: {}",
            product.product_id, product.name, product.description
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{empty_system, seeded_system};
    use std::io::Cursor;

    #[tokio::test]
    async fn test_lists_products_in_id_order() {
        let (system, fx) = seeded_system().await;
        let workflow = SaleWorkflow::new(system);
        let mut console = Console::new(Cursor::new(""), Vec::new());

        list_products(&workflow, &mut console).await.unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            format!(
                "Product ID: {}, Name: Coffee Beans, Description: Coffee Beans description",
                fx.coffee
            )
        );
        assert!(lines[2].contains("Green Tea"));
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let (system, _) = empty_system().await;
        let workflow = SaleWorkflow::new(system);
        let mut console = Console::new(Cursor::new(""), Vec::new());

        list_products(&workflow, &mut console).await.unwrap();

        assert_eq!(
            String::from_utf8(console.into_output()).unwrap(),
            "No products found.\n"
        );
    }
}
