//! # Product Repository
//!
//! Database operations for products and their pack sizes.
//!
//! Products are reference data: the till only reads them. Inserts come
//! from the seed tool.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use till_core::validation::validate_required;
use till_core::{NewProduct, Product, ProductUnit};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by id. No filtering.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, category, unit
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, product_id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, category, unit
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product and returns it with its generated id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        validate_required("name", &product.name)?;
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, category, unit)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.unit)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            product_id: result.last_insert_rowid(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
        })
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Adds a pack size for a product.
    pub async fn insert_unit(&self, product_id: i64, quantity: i64) -> DbResult<ProductUnit> {
        let result = sqlx::query("INSERT INTO product_units (product_id, quantity) VALUES (?1, ?2)")
            .bind(product_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(ProductUnit {
            unit_id: result.last_insert_rowid(),
            product_id,
            quantity,
        })
    }

    /// Lists the pack sizes of a product, smallest first.
    pub async fn units(&self, product_id: i64) -> DbResult<Vec<ProductUnit>> {
        let units = sqlx::query_as::<_, ProductUnit>(
            r#"
            SELECT unit_id, product_id, quantity
            FROM product_units
            WHERE product_id = ?1
            ORDER BY quantity, unit_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
