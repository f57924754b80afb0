//! Shared HTTP plumbing: request counting, health check, metrics
//! exposition and the listener loop. Each service contributes its own
//! domain router; everything here is identical across the three.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{Next, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// Count every request by path before it reaches its handler.
async fn track_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.metrics.hit(request.uri().path());
    next.run(request).await
}

/// Liveness plus store reachability.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy and store reachable"),
        (status = 503, description = "Store unreachable")
    ),
    tag = "System"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": state.service,
                "timestamp": chrono::Utc::now(),
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": state.service,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// Prometheus text exposition.
///
/// GET /metrics
async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Assemble the full router for one service: domain routes plus /health
/// behind the request counter, /metrics outside it, Swagger UI at /docs.
pub fn build_app(
    state: Arc<AppState>,
    routes: Router<Arc<AppState>>,
    docs: utoipa::openapi::OpenApi,
) -> Router {
    Router::new()
        .merge(routes)
        .route("/health", get(health))
        .layer(from_fn_with_state(state.clone(), track_requests))
        .route("/metrics", get(metrics))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs))
}

/// Bind and serve until the process is killed.
pub async fn serve(port: u16, app: Router) {
    let addr = format!("0.0.0.0:{}", port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
