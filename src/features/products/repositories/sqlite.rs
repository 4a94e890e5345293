use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;

use super::ProductRepository;

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, mut product: Product) -> Result<Product> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO products (category_id, name, description, price, prep_time_minutes)
            VALUES (?, ?, ?, ?, ?)
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
            WHERE category_id = ?
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
            SET category_id = ?, name = ?, description = ?, price = ?, prep_time_minutes = ?
            WHERE id = ?
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
        sqlx::query("DELETE FROM products WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{fake_product, sqlite_test_pool};

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);
        let input = fake_product(1);

        let first = repo.create(input.clone()).await.unwrap();
        let second = repo.create(fake_product(1)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first, Product { id: 1, ..input });
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);
        let burger = repo.create(fake_product(1)).await.unwrap();
        repo.create(fake_product(3)).await.unwrap();

        let snacks = repo.list_by_category(1).await.unwrap();
        assert_eq!(snacks, vec![burger]);

        assert!(repo.list_by_category(4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);
        let product = fake_product(1);

        repo.create(product.clone()).await.unwrap();
        let result = repo.create(product).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);

        let result = repo.create(fake_product(99)).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);
        let created = repo.create(fake_product(1)).await.unwrap();

        let changed = Product {
            category_id: 2,
            price: 9.9,
            ..created.clone()
        };
        repo.update(created.id, changed.clone()).await.unwrap();

        assert!(repo.list_by_category(1).await.unwrap().is_empty());
        assert_eq!(repo.list_by_category(2).await.unwrap(), vec![changed]);

        repo.delete(created.id).await.unwrap();
        assert!(repo.list_by_category(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_an_error() {
        let repo = SqliteProductRepository::new(sqlite_test_pool().await);

        assert!(repo.update(42, fake_product(1)).await.is_ok());
        assert!(repo.delete(42).await.is_ok());
    }
}
