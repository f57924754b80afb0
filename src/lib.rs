//! E-commerce services - users, products, orders
//!
//! Three HTTP services sharing one library and one PostgreSQL store:
//!
//! - `user-service` (port 5002) - user CRUD
//! - `product-service` (port 5000) - product CRUD and inventory
//! - `order-service` (port 5001) - the order creation workflow
//!
//! # Modules
//!
//! - [`config`] - environment configuration with defaults
//! - [`db`] - connection manager with bounded retry
//! - [`error`] - error taxonomy and HTTP status mapping
//! - [`users`] / [`products`] / [`orders`] - domain models, repositories, handlers
//! - [`server`] - shared router plumbing (health, metrics, request counting)

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod openapi;
pub mod server;
pub mod state;

// Domain modules
pub mod orders;
pub mod products;
pub mod users;

// Convenient re-exports at crate root
pub use config::{AppConfig, DbConfig};
pub use db::Database;
pub use error::ServiceError;
pub use state::AppState;
