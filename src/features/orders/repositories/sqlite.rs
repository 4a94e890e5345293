use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

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

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, mut order: Order) -> Result<Order> {
        // Dropping `tx` on an early return rolls the whole order back
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin order transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO orders (customer_cpf, status, created_at, payment_method)
            VALUES (?, ?, ?, ?)
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
                VALUES (?, ?, ?, ?)
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
        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
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
        sqlx::query("UPDATE orders SET payment_approved = ? WHERE id = ?")
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
