use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::products::models::Product;
use crate::features::products::services::ProductService;
use crate::shared::constants::{
    PRODUCT_DELETE_FAILED, PRODUCT_INSERTED, PRODUCT_INSERT_FAILED, PRODUCT_UPDATE_FAILED,
};

/// Create a product
///
/// Any failure, including an unreadable body, answers with the same 500 text.
#[utoipa::path(
    post,
    path = "/product",
    request_body = Product,
    responses(
        (status = 201, description = "Product inserted", body = String),
        (status = 500, description = "Invalid product or database failure", body = String)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    payload: std::result::Result<AppJson<Product>, AppError>,
) -> Result<(StatusCode, &'static str)> {
    let created = match payload {
        Ok(AppJson(product)) => service.create(product).await,
        Err(e) => Err(e),
    };

    created.map_err(|e| {
        tracing::error!("Failed to create product: {}", e);
        AppError::Internal(PRODUCT_INSERT_FAILED.to_string())
    })?;

    Ok((StatusCode::CREATED, PRODUCT_INSERTED))
}

/// List the products of a category
#[utoipa::path(
    get,
    path = "/product/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Products of the category", body = Vec<Product>),
        (status = 400, description = "Non-numeric category id", body = String),
        (status = 404, description = "No products for the category", body = String)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    AppPath(category_id): AppPath<i32>,
) -> Result<Json<Vec<Product>>> {
    let not_found = || AppError::NotFound(format!("No products found for category {}", category_id));

    match service.list_by_category(category_id).await {
        Ok(products) if !products.is_empty() => Ok(Json(products)),
        Ok(_) => Err(not_found()),
        Err(e) => {
            tracing::error!("Failed to list products for category {}: {}", category_id, e);
            Err(not_found())
        }
    }
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/product/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = Product,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Non-numeric product id", body = String),
        (status = 500, description = "Invalid product or database failure", body = String)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<i32>,
    payload: std::result::Result<AppJson<Product>, AppError>,
) -> Result<StatusCode> {
    let updated = match payload {
        Ok(AppJson(product)) => service.update(id, product).await,
        Err(e) => Err(e),
    };

    updated.map_err(|e| {
        tracing::error!("Failed to update product {}: {}", id, e);
        AppError::Internal(PRODUCT_UPDATE_FAILED.to_string())
    })?;

    Ok(StatusCode::OK)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Non-numeric product id", body = String),
        (status = 500, description = "Database failure", body = String)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode> {
    service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete product {}: {}", id, e);
        AppError::Internal(PRODUCT_DELETE_FAILED.to_string())
    })?;

    Ok(StatusCode::OK)
}
