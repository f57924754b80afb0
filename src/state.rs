use crate::db::Database;
use crate::metrics::RequestMetrics;

/// Shared application state for one service process.
pub struct AppState {
    /// Service name as reported by /health and the logs.
    pub service: &'static str,
    /// PostgreSQL connection manager.
    pub db: Database,
    /// Request counters exposed at /metrics.
    pub metrics: RequestMetrics,
}

impl AppState {
    pub fn new(service: &'static str, db: Database) -> Self {
        Self {
            service,
            db,
            metrics: RequestMetrics::new(service),
        }
    }
}
