use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for one service process.
///
/// Emits JSON lines to stdout by default (LOG_JSON=false switches to the
/// human-readable formatter). The returned guard must be held for the
/// lifetime of the process or buffered records are lost on shutdown.
pub fn init_logging(service: &'static str, config: &AppConfig) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        let layer = fmt::layer()
            .json()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(true);
        registry.with(layer).init();
    }

    tracing::info!(service, "Logging initialized");
    guard
}
