use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::orders::clients::CustomerDirectory;
use crate::features::orders::models::Order;
use crate::features::orders::repositories::OrderRepository;

/// Service for order intake and workflow updates
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    customers: Arc<dyn CustomerDirectory>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>, customers: Arc<dyn CustomerDirectory>) -> Self {
        Self {
            repository,
            customers,
        }
    }

    /// Place an order for a registered customer
    ///
    /// Fails with `Validation` for an unknown CPF and with
    /// `ExternalServiceError` when the customer service cannot answer.
    pub async fn create(&self, order: Order) -> Result<Order> {
        if !self.customers.exists(order.cpf).await? {
            return Err(AppError::Validation(format!(
                "Client with CPF {} is not registered",
                order.cpf
            )));
        }

        let order = self.repository.create(order).await?;
        tracing::info!(
            "Order created: id={}, cpf={}, lines={}",
            order.id,
            order.cpf,
            order.lines.len()
        );

        Ok(order)
    }

    pub async fn list(&self) -> Result<Vec<Order>> {
        self.repository.list().await
    }

    pub async fn update_status(&self, id: i32, status: &str) -> Result<()> {
        self.repository.update_status(id, status).await?;
        tracing::info!("Order status updated: id={}, status={:?}", id, status);

        Ok(())
    }

    pub async fn update_payment_approval(&self, id: i32, approved: bool) -> Result<()> {
        self.repository.update_payment_approval(id, approved).await?;
        tracing::info!("Order payment updated: id={}, approved={}", id, approved);

        Ok(())
    }
}
