use std::future::Future;
use std::time::Duration;

use sqlx::{
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    PgPool, SqlitePool,
};

use crate::core::config::{DatabaseConfig, RetryPolicy};

const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS product_categories (
    id SERIAL PRIMARY KEY,
    description VARCHAR(255) NOT NULL UNIQUE
);

INSERT INTO product_categories (description)
VALUES ('Snack'), ('Side'), ('Beverage'), ('Dessert')
ON CONFLICT (description) DO NOTHING;

CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    category_id INTEGER NOT NULL,
    name VARCHAR(255) NOT NULL UNIQUE,
    description VARCHAR(255) NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    prep_time_minutes INTEGER NOT NULL,

    CONSTRAINT fk_category_id FOREIGN KEY (category_id) REFERENCES product_categories(id)
);

CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    customer_cpf BIGINT,
    status VARCHAR(255),
    created_at TIMESTAMPTZ,
    payment_method VARCHAR(255),
    payment_approved BOOLEAN DEFAULT FALSE
);

CREATE TABLE IF NOT EXISTS order_products (
    product_id INTEGER NOT NULL,
    order_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    observation VARCHAR,

    PRIMARY KEY (product_id, order_id),
    CONSTRAINT fk_product FOREIGN KEY (product_id) REFERENCES products(id),
    CONSTRAINT fk_order FOREIGN KEY (order_id) REFERENCES orders(id)
);
"#;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS product_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL UNIQUE
);

INSERT OR IGNORE INTO product_categories (description)
VALUES ('Snack'), ('Side'), ('Beverage'), ('Dessert');

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    price REAL NOT NULL,
    prep_time_minutes INTEGER NOT NULL,
    FOREIGN KEY (category_id) REFERENCES product_categories(id)
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_cpf BIGINT,
    status TEXT,
    created_at TIMESTAMP,
    payment_method TEXT,
    payment_approved BOOLEAN DEFAULT 0
);

CREATE TABLE IF NOT EXISTS order_products (
    product_id INTEGER NOT NULL,
    order_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    observation TEXT,
    PRIMARY KEY (product_id, order_id),
    FOREIGN KEY (product_id) REFERENCES products(id),
    FOREIGN KEY (order_id) REFERENCES orders(id)
);
"#;

/// Runs `connect` until it succeeds or the policy's attempts are exhausted,
/// sleeping a fixed delay between attempts. Returns the last error.
pub async fn connect_with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut connect: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match connect().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_attempts => {
                tracing::warn!(
                    "Attempt {}/{}: error connecting to database: {}",
                    attempt,
                    policy.max_attempts,
                    e
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database after {} attempts: {}",
                    policy.max_attempts,
                    e
                );
                return Err(e);
            }
        }
    }
}

pub async fn create_pg_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    connect_with_retry(&config.retry, || {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.url)
    })
    .await
}

pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = config
        .url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    // Every new connection to ":memory:" opens a fresh, empty database
    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
    };
    let pool_options =
        pool_options.acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    connect_with_retry(&config.retry, || {
        pool_options.clone().connect_with(options.clone())
    })
    .await
}

pub async fn init_pg_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(POSTGRES_SCHEMA).execute(pool).await?;
    Ok(())
}

pub async fn init_sqlite_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SQLITE_SCHEMA).execute(pool).await?;
    Ok(())
}
