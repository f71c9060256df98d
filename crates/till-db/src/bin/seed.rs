//! # Seed Data Loader
//!
//! Populates the database with sample reference data for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./till.db (default)
//! cargo run -p till-db --bin seed
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! The load runs in a single transaction; a failed run leaves the
//! database empty and can simply be repeated.
//!
//! ## Loaded Data
//! - "Coffee Beans" priced 49.99 for 2024 only, so it shows how an expired
//!   price is reported at the till
//! - A handful of grocery products with prices valid 2025-2030
//! - Pack sizes for some of them
//! - The "Carta Magnit" 3% discount (2019-02-01 .. 2077-02-01), linked to
//!   the dairy products

use std::env;
use till_db::{load_sample_data, Database, DbConfig, SeedOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./till.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till POS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./till.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Till POS Seed Data Loader");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    match load_sample_data(&db).await {
        Ok(SeedOutcome::Loaded {
            products,
            discount,
            linked,
        }) => {
            println!("✓ Inserted {} products", products);
            println!("✓ Inserted discount '{}' for {} products", discount, linked);
            println!();
            println!("✓ Seed complete!");
        }
        Ok(SeedOutcome::Skipped { existing_products }) => {
            println!("⚠ Database already has {} products", existing_products);
            println!("  Skipping seed to avoid duplicates.");
            println!("  Delete the database file to reseed.");
        }
        Err(e) => {
            db.close().await;
            return Err(e.into());
        }
    }

    db.close().await;
    Ok(())
}
