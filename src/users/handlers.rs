//! User HTTP handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use super::models::{NewUser, UserUpdate};
use super::repository::UserRepository;
use crate::error::ServiceError;
use crate::state::AppState;

type HandlerResult = Result<(StatusCode, Json<Value>), ServiceError>;

/// List all users
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users with count"),
        (status = 500, description = "Store failure")
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> HandlerResult {
    tracing::info!("Fetching all users");
    let mut conn = state.db.acquire().await?;
    let users = UserRepository::list(&mut conn).await?;

    tracing::info!("Successfully fetched {} users", users.len());
    Ok((
        StatusCode::OK,
        Json(json!({ "users": users, "count": users.len() })),
    ))
}

/// Get user by ID
///
/// GET /users/{user_id}
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> HandlerResult {
    tracing::info!("Fetching user {}", user_id);
    let mut conn = state.db.acquire().await?;
    let user = UserRepository::get(&mut conn, user_id)
        .await?
        .ok_or(ServiceError::NotFound("User"))?;

    Ok((StatusCode::OK, Json(json!({ "user": user }))))
}

/// Create a new user
///
/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Store failure")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewUser>,
) -> HandlerResult {
    tracing::info!("Creating new user: {:?}", body.username);
    let (username, email) = body.validate()?;

    let mut conn = state.db.acquire().await?;
    let user = UserRepository::create(&mut conn, &username, &email).await?;

    tracing::info!("User created successfully: {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created", "user": user })),
    ))
}

/// Update username and/or email
///
/// PUT /users/{user_id}
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(update): Json<UserUpdate>,
) -> HandlerResult {
    tracing::info!("Updating user {}", user_id);
    if update.is_empty() {
        return Err(ServiceError::Validation("No fields to update".to_string()));
    }

    let mut conn = state.db.acquire().await?;
    let user = UserRepository::update(&mut conn, user_id, &update)
        .await?
        .ok_or(ServiceError::NotFound("User"))?;

    tracing::info!("User {} updated successfully", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User updated", "user": user })),
    ))
}
