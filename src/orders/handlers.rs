//! Order HTTP handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use super::models::{NewOrder, StatusUpdate};
use super::repository::OrderRepository;
use crate::error::ServiceError;
use crate::state::AppState;

type HandlerResult = Result<(StatusCode, Json<Value>), ServiceError>;

/// List all orders
///
/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders with count, newest first"),
        (status = 500, description = "Store failure")
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> HandlerResult {
    tracing::info!("Fetching all orders");
    let mut conn = state.db.acquire().await?;
    let orders = OrderRepository::list(&mut conn).await?;

    tracing::info!("Successfully fetched {} orders", orders.len());
    Ok((
        StatusCode::OK,
        Json(json!({ "orders": orders, "count": orders.len() })),
    ))
}

/// Get order by ID
///
/// GET /orders/{order_id}
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i32>,
) -> HandlerResult {
    tracing::info!("Fetching order {}", order_id);
    let mut conn = state.db.acquire().await?;
    let order = OrderRepository::get(&mut conn, order_id)
        .await?
        .ok_or(ServiceError::NotFound("Order"))?;

    Ok((StatusCode::OK, Json(json!({ "order": order }))))
}

/// Create an order
///
/// POST /orders
///
/// Validates stock, computes the total, persists the order and decrements
/// inventory as one atomic unit.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created"),
        (status = 400, description = "Missing fields, non-positive quantity, or insufficient stock"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewOrder>,
) -> HandlerResult {
    tracing::info!("Creating new order: {:?}", body);
    let new = body.validate()?;

    let mut conn = state.db.acquire().await?;
    let order = OrderRepository::create(&mut conn, new)
        .await
        .inspect_err(|e| tracing::error!("Error creating order: {}", e))?;

    tracing::info!(
        "Order created successfully: id={} total_price={}",
        order.id,
        order.total_price
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Order created", "order": order })),
    ))
}

/// Update an order's status
///
/// PUT /orders/{order_id}/status
#[utoipa::path(
    put,
    path = "/orders/{order_id}/status",
    params(("order_id" = i32, Path, description = "Order ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Order status updated"),
        (status = 400, description = "Status field required"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i32>,
    Json(body): Json<StatusUpdate>,
) -> HandlerResult {
    let status = body.validate()?;

    let mut conn = state.db.acquire().await?;
    let order = OrderRepository::update_status(&mut conn, order_id, &status)
        .await?
        .ok_or(ServiceError::NotFound("Order"))?;

    tracing::info!("Order {} status updated to {}", order_id, status);
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Order status updated", "order": order })),
    ))
}
