use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::orders::models::{Order, OrderRow};
use crate::shared::constants::ORDER_STATUS_RECEIVED;

use super::{group_rows, OrderRepository};

const LIST_ORDERS: &str = r#"
    SELECT
        o.id,
        o.customer_cpf,
        o.status,
        o.payment_method,
        o.payment_approved,
        op.product_id,
        op.quantity,
        op.observation
    FROM orders o
    INNER JOIN order_products op ON o.id = op.order_id
"#;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, mut order: Order) -> Result<Order> {
        // Dropping `tx` on an early return rolls the whole order back
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin order transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO orders (customer_cpf, status, created_at, payment_method)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(order.cpf)
        .bind(ORDER_STATUS_RECEIVED)
        .bind(Utc::now())
        .bind(&order.payment_method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert order: {:?}", e);
            AppError::Database(e)
        })?;

        for line in &order.lines {
            sqlx::query(
                r#"
                INSERT INTO order_products (product_id, order_id, quantity, observation)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(line.product_id)
            .bind(id)
            .bind(line.quantity)
            .bind(&line.observation)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to insert line (product {}) of order {}: {:?}",
                    line.product_id,
                    id,
                    e
                );
                AppError::Database(e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit order {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        order.id = id;
        order.status = ORDER_STATUS_RECEIVED.to_string();
        order.payment_approved = false;
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(LIST_ORDERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list orders: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(group_rows(rows))
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<()> {
        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status of order {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    async fn update_payment_approval(&self, id: i32, approved: bool) -> Result<()> {
        sqlx::query("UPDATE orders SET payment_approved = $1 WHERE id = $2")
            .bind(approved)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update payment of order {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}

/// Run only when `TEST_DATABASE_URL` points at a PostgreSQL server
#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::orders::models::OrderLine;
    use crate::features::products::models::Product;
    use crate::features::products::repositories::{PgProductRepository, ProductRepository};
    use crate::shared::test_helpers::{fake_product, pg_test_pool};
    use fake::Fake;
    use uuid::Uuid;

    async fn new_product(pool: &PgPool) -> i32 {
        let product = fake_product(1);
        let product = Product {
            name: format!("{} {}", product.name, Uuid::now_v7()),
            ..product
        };
        PgProductRepository::new(pool.clone())
            .create(product)
            .await
            .unwrap()
            .id
    }

    /// The database is shared between tests, so every order gets its own CPF
    fn order(lines: Vec<OrderLine>) -> Order {
        Order {
            cpf: (10_000_000_000_i64..99_999_999_999).fake(),
            payment_method: "pix".to_string(),
            lines,
            ..Order::default()
        }
    }

    fn line(product_id: i32, quantity: i32) -> OrderLine {
        OrderLine {
            product_id,
            quantity,
            observation: format!("note {}", quantity),
        }
    }

    async fn find(repo: &PgOrderRepository, id: i32) -> Order {
        let mut order = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|o| o.id == id)
            .unwrap();
        order.lines.sort_by_key(|l| l.product_id);
        order
    }

    #[tokio::test]
    async fn test_create_list_and_updates() {
        let Some(pool) = pg_test_pool().await else {
            return;
        };
        let first = new_product(&pool).await;
        let second = new_product(&pool).await;
        let repo = PgOrderRepository::new(pool);

        let created = repo
            .create(order(vec![line(second, 1), line(first, 2)]))
            .await
            .unwrap();
        assert_eq!(created.status, ORDER_STATUS_RECEIVED);

        let listed = find(&repo, created.id).await;
        assert_eq!(listed.cpf, created.cpf);
        assert_eq!(listed.lines, vec![line(first, 2), line(second, 1)]);
        assert!(!listed.payment_approved);

        repo.update_status(created.id, "Completed").await.unwrap();
        repo.update_payment_approval(created.id, true).await.unwrap();

        let listed = find(&repo, created.id).await;
        assert_eq!(listed.status, "Completed");
        assert!(listed.payment_approved);
    }

    #[tokio::test]
    async fn test_failed_line_rolls_back_order() {
        let Some(pool) = pg_test_pool().await else {
            return;
        };
        let product = new_product(&pool).await;
        let repo = PgOrderRepository::new(pool.clone());
        let bad = order(vec![line(product, 1), line(i32::MAX, 1)]);
        let cpf = bad.cpf;

        let result = repo.create(bad).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE customer_cpf = $1")
            .bind(cpf)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
