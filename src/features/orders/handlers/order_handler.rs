use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::orders::dtos::{UpdateOrderPaymentDto, UpdateOrderStatusDto};
use crate::features::orders::models::Order;
use crate::features::orders::services::OrderService;
use crate::shared::constants::{
    CUSTOMER_SERVICE_UNAVAILABLE, ORDER_CREATE_FAILED, ORDER_LIST_FAILED, ORDER_PAYMENT_UPDATED,
    ORDER_PAYMENT_UPDATE_FAILED, ORDER_UPDATED, ORDER_UPDATE_FAILED,
};

/// Place an order
#[utoipa::path(
    post,
    path = "/order",
    request_body = Order,
    responses(
        (status = 201, description = "Order inserted", body = String, example = "Order inserted with id 1"),
        (status = 400, description = "Malformed body", body = String),
        (status = 500, description = "Unknown customer or database failure", body = String),
        (status = 502, description = "Customer service unavailable", body = String)
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(service): State<Arc<OrderService>>,
    AppJson(order): AppJson<Order>,
) -> Result<(StatusCode, String)> {
    let order = service.create(order).await.map_err(|e| {
        tracing::error!("Failed to create order: {}", e);
        match e {
            AppError::ExternalServiceError(_) => {
                AppError::ExternalServiceError(CUSTOMER_SERVICE_UNAVAILABLE.to_string())
            }
            _ => AppError::Internal(ORDER_CREATE_FAILED.to_string()),
        }
    })?;

    Ok((
        StatusCode::CREATED,
        format!("Order inserted with id {}", order.id),
    ))
}

/// List orders that have at least one line
#[utoipa::path(
    get,
    path = "/order",
    responses(
        (status = 200, description = "All orders", body = Vec<Order>),
        (status = 500, description = "Database failure", body = String)
    ),
    tag = "orders"
)]
pub async fn list_orders(State(service): State<Arc<OrderService>>) -> Result<Json<Vec<Order>>> {
    let orders = service.list().await.map_err(|e| {
        tracing::error!("Failed to list orders: {}", e);
        AppError::Internal(ORDER_LIST_FAILED.to_string())
    })?;

    Ok(Json(orders))
}

/// Change the workflow status of an order
#[utoipa::path(
    patch,
    path = "/order/update/{id}",
    params(
        ("id" = i32, Path, description = "Order id")
    ),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 201, description = "Order updated", body = String),
        (status = 400, description = "Non-numeric id or malformed body", body = String),
        (status = 500, description = "Database failure", body = String)
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    State(service): State<Arc<OrderService>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateOrderStatusDto>,
) -> Result<(StatusCode, &'static str)> {
    service.update_status(id, &dto.status).await.map_err(|e| {
        tracing::error!("Failed to update order {}: {}", id, e);
        AppError::Internal(ORDER_UPDATE_FAILED.to_string())
    })?;

    Ok((StatusCode::CREATED, ORDER_UPDATED))
}

/// Record whether the payment of an order was approved
#[utoipa::path(
    patch,
    path = "/order/payment/{id}",
    params(
        ("id" = i32, Path, description = "Order id")
    ),
    request_body = UpdateOrderPaymentDto,
    responses(
        (status = 201, description = "Order payment updated", body = String),
        (status = 400, description = "Non-numeric id or malformed body", body = String),
        (status = 500, description = "Database failure", body = String)
    ),
    tag = "orders"
)]
pub async fn update_order_payment(
    State(service): State<Arc<OrderService>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateOrderPaymentDto>,
) -> Result<(StatusCode, &'static str)> {
    service
        .update_payment_approval(id, dto.payment_approved)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update payment of order {}: {}", id, e);
            AppError::Internal(ORDER_PAYMENT_UPDATE_FAILED.to_string())
        })?;

    Ok((StatusCode::CREATED, ORDER_PAYMENT_UPDATED))
}
