//! Order persistence
//!
//! Creating an order writes the order row and all of its lines in one
//! transaction. Listing reads a single inner join, so an order without lines
//! is never returned.

mod postgres;
mod sqlite;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::orders::models::{Order, OrderRow};

pub use postgres::PgOrderRepository;
pub use sqlite::SqliteOrderRepository;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order with status "Received" and returns it with its id
    async fn create(&self, order: Order) -> Result<Order>;

    async fn list(&self) -> Result<Vec<Order>>;

    async fn update_status(&self, id: i32, status: &str) -> Result<()>;

    async fn update_payment_approval(&self, id: i32, approved: bool) -> Result<()>;
}

/// Folds join rows into orders.
///
/// Orders keep the order in which their id first shows up; lines keep row
/// order.
pub(crate) fn group_rows(rows: Vec<OrderRow>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();
    let mut index_by_id: HashMap<i32, usize> = HashMap::new();

    for row in rows {
        match index_by_id.get(&row.id) {
            Some(&index) => orders[index].lines.push(row.line()),
            None => {
                index_by_id.insert(row.id, orders.len());
                orders.push(row.into());
            }
        }
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, product_id: i32) -> OrderRow {
        OrderRow {
            id,
            customer_cpf: Some(100 + id as i64),
            status: Some("Received".to_string()),
            payment_method: Some("card".to_string()),
            payment_approved: Some(false),
            product_id,
            quantity: 1,
            observation: None,
        }
    }

    #[test]
    fn test_group_rows_preserves_first_appearance() {
        let rows = vec![row(2, 10), row(1, 11), row(2, 12), row(3, 13), row(1, 14)];

        let orders = group_rows(rows);

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let lines: Vec<Vec<i32>> = orders
            .iter()
            .map(|o| o.lines.iter().map(|l| l.product_id).collect())
            .collect();
        assert_eq!(lines, vec![vec![10, 12], vec![11, 14], vec![13]]);
        assert_eq!(orders[1].cpf, 101);
    }

    #[test]
    fn test_group_rows_empty() {
        assert!(group_rows(Vec::new()).is_empty());
    }
}
