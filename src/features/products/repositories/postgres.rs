use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;

use super::ProductRepository;

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, mut product: Product) -> Result<Product> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO products (category_id, name, description, price, prep_time_minutes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.prep_time_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert product: {:?}", e);
            AppError::Database(e)
        })?;

        product.id = id;
        Ok(product)
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, description, price, prep_time_minutes
            FROM products
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to list products for category {}: {:?}",
                category_id,
                e
            );
            AppError::Database(e)
        })
    }

    async fn update(&self, id: i32, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET category_id = $1, name = $2, description = $3, price = $4, prep_time_minutes = $5
            WHERE id = $6
            "#,
        )
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.prep_time_minutes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}
