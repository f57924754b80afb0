//! Product HTTP handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use super::models::{NewProduct, ProductUpdate};
use super::repository::ProductRepository;
use crate::error::ServiceError;
use crate::state::AppState;

type HandlerResult = Result<(StatusCode, Json<Value>), ServiceError>;

/// List all products
///
/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products with count"),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> HandlerResult {
    tracing::info!("Fetching all products");
    let mut conn = state.db.acquire().await?;
    let products = ProductRepository::list(&mut conn).await?;

    tracing::info!("Successfully fetched {} products", products.len());
    Ok((
        StatusCode::OK,
        Json(json!({ "products": products, "count": products.len() })),
    ))
}

/// Get product by ID
///
/// GET /products/{product_id}
#[utoipa::path(
    get,
    path = "/products/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
) -> HandlerResult {
    tracing::info!("Fetching product {}", product_id);
    let mut conn = state.db.acquire().await?;
    let product = ProductRepository::get(&mut conn, product_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Product {} not found", product_id);
            ServiceError::NotFound("Product")
        })?;

    Ok((StatusCode::OK, Json(json!({ "product": product }))))
}

/// Create a new product
///
/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Missing required fields"),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewProduct>,
) -> HandlerResult {
    tracing::info!("Creating new product: {:?}", body.name);
    let (name, price, stock) = body.validate()?;

    let mut conn = state.db.acquire().await?;
    let product = ProductRepository::create(&mut conn, &name, price, stock).await?;

    tracing::info!("Product created successfully: {}", product.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product created", "product": product })),
    ))
}

/// Update name, price and/or stock
///
/// PUT /products/{product_id}
#[utoipa::path(
    put,
    path = "/products/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
    Json(update): Json<ProductUpdate>,
) -> HandlerResult {
    tracing::info!("Updating product {}", product_id);
    if update.is_empty() {
        return Err(ServiceError::Validation("No fields to update".to_string()));
    }

    let mut conn = state.db.acquire().await?;
    let product = ProductRepository::update(&mut conn, product_id, &update)
        .await?
        .ok_or(ServiceError::NotFound("Product"))?;

    tracing::info!("Product {} updated successfully", product_id);
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Product updated", "product": product })),
    ))
}

/// Delete a product
///
/// DELETE /products/{product_id}
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i32>,
) -> HandlerResult {
    tracing::info!("Deleting product {}", product_id);
    let mut conn = state.db.acquire().await?;
    if !ProductRepository::delete(&mut conn, product_id).await? {
        return Err(ServiceError::NotFound("Product"));
    }

    tracing::info!("Product {} deleted successfully", product_id);
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Product deleted" })),
    ))
}
