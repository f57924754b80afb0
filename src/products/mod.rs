//! Product CRUD and inventory service

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{NewProduct, Product, ProductUpdate};
pub use repository::ProductRepository;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/{product_id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
}
