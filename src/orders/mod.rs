//! Order service: the create-order workflow plus status updates and
//! read-only queries. Order creation is the one path with real
//! invariants - see [`repository::OrderRepository::create`].

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{NewOrder, Order, OrderDetails, StatusUpdate, ValidNewOrder};
pub use repository::OrderRepository;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(handlers::list_orders).post(handlers::create_order))
        .route("/orders/{order_id}", get(handlers::get_order))
        .route("/orders/{order_id}/status", put(handlers::update_order_status))
}
