//! Shared fixtures for till-cli tests.

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use till_core::{DiscountRate, Money, NewDiscount, NewProduct, NewProductPrice};
use till_db::{Database, DbConfig};

use crate::system::SaleSystem;

/// Ids of the rows created by [`seeded_system`].
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// 49.99 per bag, valid now.
    pub coffee: i64,
    /// 1.20 per bottle, valid now.
    pub milk: i64,
    /// Only an expired price.
    pub expired_tea: i64,
    /// 3%, valid now.
    pub carta_magnit: i64,
    /// 10%, already over.
    pub expired_discount: i64,
}

pub async fn empty_system() -> (SaleSystem, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    (SaleSystem::new(db.clone()), db)
}

async fn product(db: &Database, name: &str, unit: &str) -> i64 {
    db.products()
        .insert(&NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            category: "Test".to_string(),
            unit: unit.to_string(),
        })
        .await
        .unwrap()
        .product_id
}

pub async fn seeded_system() -> (SaleSystem, Fixture) {
    let (system, db) = empty_system().await;
    let now = Utc::now();
    let current = (now - Duration::days(30), now + Duration::days(365));
    let past = (
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap(),
    );

    let coffee = product(&db, "Coffee Beans", "bag").await;
    let milk = product(&db, "Milk", "bottle").await;
    let expired_tea = product(&db, "Green Tea", "box").await;

    for (product_id, price, (start_date, end_date)) in [
        (coffee, dec!(49.99), current),
        (milk, dec!(1.20), current),
        (expired_tea, dec!(4.50), past),
    ] {
        db.prices()
            .insert(&NewProductPrice {
                product_id,
                price: Money::from_decimal(price),
                start_date,
                end_date,
            })
            .await
            .unwrap();
    }

    db.products().insert_unit(milk, 6).await.unwrap();

    let carta_magnit = db
        .discounts()
        .insert(&NewDiscount {
            name: "Carta Magnit".to_string(),
            description: "3% and bonusi".to_string(),
            discount_percentage: DiscountRate::new(dec!(3.0)).unwrap(),
            start_date: current.0,
            end_date: current.1,
        })
        .await
        .unwrap()
        .discount_id;
    db.discounts().link_product(carta_magnit, milk).await.unwrap();

    let expired_discount = db
        .discounts()
        .insert(&NewDiscount {
            name: "Spring Sale".to_string(),
            description: "Seasonal".to_string(),
            discount_percentage: DiscountRate::new(dec!(10)).unwrap(),
            start_date: past.0,
            end_date: past.1,
        })
        .await
        .unwrap()
        .discount_id;

    let fixture = Fixture {
        coffee,
        milk,
        expired_tea,
        carta_magnit,
        expired_discount,
    };
    (system, fixture)
}
