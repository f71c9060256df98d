//! # Main Menu
//!
//! The interactive loop behind `till run`.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Welcome to the Sale System!"                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──► print menu ──► "Select an option: " ──► MenuOption::parse        │
//! │  │                                                 │                    │
//! │  │        ┌────────────────────────────────────────┤                    │
//! │  │        │ None                                   │ Some(option)       │
//! │  │        ▼                                        ▼                    │
//! │  │  "Invalid option, try again."            commands::*                 │
//! │  │        │                                        │                    │
//! │  │        │        Ok / non-fatal Err (printed)    │                    │
//! │  └────────┴────────────────────────────────────────┘                    │
//! │                                                                         │
//! │  Exit or EndOfInput ──► "Exiting system. Goodbye!" ──► Ok(())          │
//! │  fatal Err (storage, terminal) ──────────────────────► Err(e)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::commands;
use crate::console::Console;
use crate::error::{AppError, AppResult};
use crate::workflow::SaleWorkflow;

/// The nine menu entries, numbered as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ListProducts,
    StartSale,
    AddItem,
    RemoveItem,
    ApplyDiscount,
    CancelSale,
    CompleteSale,
    ListReceipts,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::ListProducts,
        MenuOption::StartSale,
        MenuOption::AddItem,
        MenuOption::RemoveItem,
        MenuOption::ApplyDiscount,
        MenuOption::CancelSale,
        MenuOption::CompleteSale,
        MenuOption::ListReceipts,
        MenuOption::Exit,
    ];

    /// Maps the operator's answer to an option. Anything but `1`..`9` is
    /// `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuOption::ListProducts),
            "2" => Some(MenuOption::StartSale),
            "3" => Some(MenuOption::AddItem),
            "4" => Some(MenuOption::RemoveItem),
            "5" => Some(MenuOption::ApplyDiscount),
            "6" => Some(MenuOption::CancelSale),
            "7" => Some(MenuOption::CompleteSale),
            "8" => Some(MenuOption::ListReceipts),
            "9" => Some(MenuOption::Exit),
            _ => None,
        }
    }

    pub fn number(self) -> usize {
        match self {
            MenuOption::ListProducts => 1,
            MenuOption::StartSale => 2,
            MenuOption::AddItem => 3,
            MenuOption::RemoveItem => 4,
            MenuOption::ApplyDiscount => 5,
            MenuOption::CancelSale => 6,
            MenuOption::CompleteSale => 7,
            MenuOption::ListReceipts => 8,
            MenuOption::Exit => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::ListProducts => "List Products",
            MenuOption::StartSale => "Start Sale",
            MenuOption::AddItem => "Add Item to Sale",
            MenuOption::RemoveItem => "Remove Item from Sale",
            MenuOption::ApplyDiscount => "Apply Discount",
            MenuOption::CancelSale => "Cancel Sale",
            MenuOption::CompleteSale => "Complete Sale",
            MenuOption::ListReceipts => "List Receipts",
            MenuOption::Exit => "Exit",
        }
    }
}

/// Whether the loop keeps going after an option.
enum Flow {
    Continue,
    Exit,
}

async fn dispatch<R: BufRead, W: Write>(
    option: MenuOption,
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<Flow> {
    let now = Utc::now();

    match option {
        MenuOption::ListProducts => commands::list_products(workflow, console).await?,
        MenuOption::StartSale => commands::start_sale(workflow, console)?,
        MenuOption::AddItem => commands::add_item(workflow, console, now).await?,
        MenuOption::RemoveItem => commands::remove_item(workflow, console)?,
        MenuOption::ApplyDiscount => commands::apply_discount(workflow, console, now).await?,
        MenuOption::CancelSale => commands::cancel_sale(workflow, console)?,
        MenuOption::CompleteSale => commands::complete_sale(workflow, console, now).await?,
        MenuOption::ListReceipts => commands::list_receipts(workflow, console).await?,
        MenuOption::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> AppResult<()> {
    console.say("\nMain Menu:")?;
    for option in MenuOption::ALL {
        console.say(format!("{}. {}", option.number(), option.label()))?;
    }
    Ok(())
}

/// Runs the menu until the operator exits, input ends or a fatal error
/// occurs.
pub async fn run_menu<R: BufRead, W: Write>(
    workflow: &mut SaleWorkflow,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    console.say("Welcome to the Sale System!")?;

    loop {
        print_menu(console)?;

        let answer = match console.prompt("Select an option: ") {
            Ok(answer) => answer,
            Err(AppError::EndOfInput) => break,
            Err(e) => return Err(e),
        };

        let Some(option) = MenuOption::parse(&answer) else {
            console.say("Invalid option, try again.")?;
            continue;
        };
        debug!(option = option.number(), "Menu option selected");

        match dispatch(option, workflow, console).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) | Err(AppError::EndOfInput) => break,
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Fatal error, leaving the menu");
                return Err(e);
            }
            Err(e) => console.say(e.to_string())?,
        }
    }

    console.say("Exiting system. Goodbye!")
}
