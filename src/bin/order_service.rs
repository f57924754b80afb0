//! Order Service entry point (port 5001)

use std::sync::Arc;

use anyhow::Result;
use utoipa::OpenApi;

use ecommerce_services::config::AppConfig;
use ecommerce_services::db::Database;
use ecommerce_services::openapi::OrderApiDoc;
use ecommerce_services::state::AppState;
use ecommerce_services::{logging, orders, server};

const SERVICE_NAME: &str = "order-service";
const DEFAULT_PORT: u16 = 5001;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let _log_guard = logging::init_logging(SERVICE_NAME, &config);

    let db = Database::connect(&config.db)?;
    let state = Arc::new(AppState::new(SERVICE_NAME, db));

    // The schema is normally provisioned with the store; creating it here
    // covers fresh local setups. Requests retry the connection themselves.
    if let Err(e) = state.db.init_schema().await {
        tracing::warn!("Schema init failed, assuming it is managed externally: {}", e);
    }

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let app = server::build_app(state, orders::router(), OrderApiDoc::openapi());

    tracing::info!("Starting Order Service on port {}", port);
    server::serve(port, app).await;
    Ok(())
}
