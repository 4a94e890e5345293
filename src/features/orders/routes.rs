use std::sync::Arc;

use axum::{
    routing::{patch, post},
    Router,
};

use crate::features::orders::handlers;
use crate::features::orders::services::OrderService;

/// Create routes for the orders feature
pub fn routes(service: Arc<OrderService>) -> Router {
    Router::new()
        .route(
            "/order",
            post(handlers::create_order).get(handlers::list_orders),
        )
        .route("/order/update/{id}", patch(handlers::update_order_status))
        .route("/order/payment/{id}", patch(handlers::update_order_payment))
        .with_state(service)
}
