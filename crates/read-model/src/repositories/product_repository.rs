use async_trait::async_trait;
use domain::{CreateProductCommand, UpdateProductCommand};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::query::{FilterArg, FilterQuery, PRODUCT_COLUMNS};
use crate::ReadModelError;

/// Read model representation of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub product_name: String,
    pub product_description: Option<String>,
    pub product_price: f64,
    pub product_images: Vec<String>,
    /// Filled in by the image pipeline; `None` until processing has run
    pub compressed_product_images: Option<Vec<String>>,
}

/// Backing store for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return its store-assigned ID
    async fn create(&self, cmd: &CreateProductCommand) -> Result<i64, ReadModelError>;

    /// Get a single product by ID
    async fn get_by_id(&self, product_id: i64) -> Result<Option<Product>, ReadModelError>;

    /// Run a query produced by the filter query builder
    async fn find_filtered(&self, query: &FilterQuery) -> Result<Vec<Product>, ReadModelError>;

    /// Overwrite the mutable attributes of a product. Returns the number of rows affected,
    /// which is zero when the product does not exist.
    async fn update(&self, product_id: i64, cmd: &UpdateProductCommand) -> Result<u64, ReadModelError>;

    /// Check if the store is reachable (health check)
    async fn ping(&self) -> Result<(), ReadModelError>;
}

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, cmd: &CreateProductCommand) -> Result<i64, ReadModelError> {
        let product_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (user_id, product_name, product_description, product_price, product_images)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(cmd.user_id)
        .bind(&cmd.product_name)
        .bind(&cmd.product_description)
        .bind(cmd.product_price)
        .bind(&cmd.product_images)
        .fetch_one(&self.pool)
        .await?;

        Ok(product_id)
    }

    async fn get_by_id(&self, product_id: i64) -> Result<Option<Product>, ReadModelError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_filtered(&self, query: &FilterQuery) -> Result<Vec<Product>, ReadModelError> {
        debug!(sql = %query.sql, args = ?query.args, "Executing product filter query");

        let mut statement = sqlx::query_as::<_, Product>(&query.sql);
        for arg in &query.args {
            statement = match arg {
                FilterArg::Int(value) => statement.bind(*value),
                FilterArg::Float(value) => statement.bind(*value),
                FilterArg::Text(value) => statement.bind(value.as_str()),
            };
        }

        let products = statement.fetch_all(&self.pool).await?;
        Ok(products)
    }

    async fn update(&self, product_id: i64, cmd: &UpdateProductCommand) -> Result<u64, ReadModelError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET product_name = $1, product_description = $2, product_price = $3, product_images = $4
            WHERE id = $5
            "#,
        )
        .bind(&cmd.product_name)
        .bind(&cmd.product_description)
        .bind(cmd.product_price)
        .bind(&cmd.product_images)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), ReadModelError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serialization() {
        let product = Product {
            id: 12,
            user_id: 7,
            product_name: "Linen shirt".to_string(),
            product_description: None,
            product_price: 49.5,
            product_images: vec!["raw/shirt.jpg".to_string()],
            compressed_product_images: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["product_name"], "Linen shirt");
        assert!(json["compressed_product_images"].is_null());

        let deserialized: Product = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, product);
    }
}
