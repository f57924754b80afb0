//! User CRUD service

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{NewUser, User, UserUpdate};
pub use repository::UserRepository;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/users/{user_id}",
            get(handlers::get_user).put(handlers::update_user),
        )
}
