use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;
use crate::features::products::repositories::ProductRepository;

/// Service for catalog operations
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Validate and insert a product
    pub async fn create(&self, product: Product) -> Result<Product> {
        Self::validate(&product)?;

        let product = self.repository.create(product).await?;
        tracing::info!(
            "Product created: id={}, name={:?}",
            product.id,
            product.name
        );

        Ok(product)
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<Product>> {
        self.repository.list_by_category(category_id).await
    }

    /// Validate and overwrite every field of product `id`
    pub async fn update(&self, id: i32, product: Product) -> Result<()> {
        Self::validate(&product)?;

        self.repository.update(id, product).await?;
        tracing::info!("Product updated: id={}", id);

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        self.repository.delete(id).await?;
        tracing::info!("Product deleted: id={}", id);

        Ok(())
    }

    fn validate(product: &Product) -> Result<()> {
        product.validate().map_err(|e| {
            tracing::warn!("Invalid product {:?}: {}", product.name, e);
            AppError::Validation("Invalid product".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::products::repositories::SqliteProductRepository;
    use crate::shared::test_helpers::{fake_product, sqlite_test_pool};

    async fn service() -> ProductService {
        let pool = sqlite_test_pool().await;
        ProductService::new(Arc::new(SqliteProductRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_create_echoes_input_with_id() {
        let service = service().await;
        let input = fake_product(2);

        let created = service.create(input.clone()).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created, Product { id: created.id, ..input });
    }

    #[tokio::test]
    async fn test_invalid_product_never_reaches_repository() {
        let service = service().await;
        let invalid = [
            Product { name: String::new(), ..fake_product(1) },
            Product { price: 0.0, ..fake_product(1) },
            Product { description: String::new(), ..fake_product(1) },
            Product { category_id: 0, ..fake_product(1) },
            Product { prep_time_minutes: 0, ..fake_product(1) },
        ];

        for product in invalid {
            let result = service.create(product.clone()).await;
            assert!(matches!(result, Err(AppError::Validation(_))));

            let result = service.update(1, product).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        for category in 1..=4 {
            assert!(service.list_by_category(category).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_row_untouched() {
        let service = service().await;
        let created = service.create(fake_product(1)).await.unwrap();

        let result = service
            .update(created.id, Product { name: String::new(), ..created.clone() })
            .await;

        assert!(result.is_err());
        assert_eq!(service.list_by_category(1).await.unwrap(), vec![created]);
    }
}
