//! Product persistence
//!
//! One trait, two engines: PostgreSQL for deployments and SQLite for local
//! runs and tests. The backend is picked from configuration at startup.

mod postgres;
mod sqlite;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::products::models::Product;

pub use postgres::PgProductRepository;
pub use sqlite::SqliteProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts the product and returns it with the generated id
    async fn create(&self, product: Product) -> Result<Product>;

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<Product>>;

    async fn update(&self, id: i32, product: Product) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}
