use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Create routes for the products feature
///
/// `/product/{id}` is shared by three methods: GET reads the id as a
/// category, PUT and DELETE as a product.
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/product", post(handlers::create_product))
        .route(
            "/product/{id}",
            get(handlers::list_products)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(service)
}
