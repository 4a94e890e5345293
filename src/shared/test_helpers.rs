use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use fake::{
    faker::lorem::en::{Sentence, Word},
    Fake,
};

use sqlx::{PgPool, SqlitePool};
use tokio::sync::OnceCell;

use crate::core::config::{DatabaseBackend, DatabaseConfig, RetryPolicy};
use crate::core::database;
use crate::core::error::{AppError, Result};
use crate::features::orders::clients::CustomerDirectory;
use crate::features::products::models::Product;

/// Fresh in-memory SQLite database with the production schema
pub async fn sqlite_test_pool() -> SqlitePool {
    let config = DatabaseConfig {
        backend: DatabaseBackend::Sqlite,
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 600,
        max_lifetime_secs: 1800,
        retry: RetryPolicy {
            max_attempts: 1,
            delay: std::time::Duration::ZERO,
        },
    };

    let pool = database::create_sqlite_pool(&config)
        .await
        .expect("in-memory sqlite pool");
    database::init_sqlite_schema(&pool)
        .await
        .expect("sqlite schema");
    pool
}

static PG_SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Pool on the PostgreSQL database named by `TEST_DATABASE_URL`, with the
/// production schema. `None` when the variable is unset so PostgreSQL tests
/// are skipped on machines without a server.
///
/// Tests share the database, so they must not assume empty tables.
pub async fn pg_test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        backend: DatabaseBackend::Postgres,
        url,
        max_connections: 2,
        min_connections: 0,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 600,
        max_lifetime_secs: 1800,
        retry: RetryPolicy {
            max_attempts: 1,
            delay: std::time::Duration::ZERO,
        },
    };

    let pool = database::create_pg_pool(&config)
        .await
        .expect("postgres test pool");
    // Concurrent CREATE TABLE IF NOT EXISTS can race in PostgreSQL
    PG_SCHEMA
        .get_or_init(|| async {
            database::init_pg_schema(&pool)
                .await
                .expect("postgres schema");
        })
        .await;
    Some(pool)
}

static PRODUCT_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Valid product with a unique name in the given category
pub fn fake_product(category_id: i32) -> Product {
    let seq = PRODUCT_SEQ.fetch_add(1, Ordering::Relaxed);
    let word: String = Word().fake();

    Product {
        id: 0,
        category_id,
        name: format!("{} {}", word, seq),
        description: Sentence(3..6).fake(),
        price: (1.0_f64..80.0).fake(),
        prep_time_minutes: (1_i32..45).fake(),
    }
}

/// Customer directory with a fixed answer
pub enum StubCustomers {
    Known,
    Unknown,
    Unreachable,
}

#[async_trait]
impl CustomerDirectory for StubCustomers {
    async fn exists(&self, cpf: i64) -> Result<bool> {
        match self {
            StubCustomers::Known => Ok(true),
            StubCustomers::Unknown => Ok(false),
            StubCustomers::Unreachable => Err(AppError::ExternalServiceError(format!(
                "customer lookup for {} timed out",
                cpf
            ))),
        }
    }
}
