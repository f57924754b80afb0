//! Database connection management
//!
//! Each request checks out its own connection through [`Database::acquire`],
//! which wraps pool checkout in a bounded retry: transient failures (store
//! not yet accepting connections, pool starved) are retried with a fixed
//! delay, everything else propagates immediately. The checked-out
//! connection is released on drop on every exit path.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};

use crate::config::DbConfig;
use crate::error::ServiceError;

/// Maximum connection attempts per request.
pub const MAX_RETRIES: u32 = 5;
/// Fixed delay between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// PostgreSQL connection pool shared by one service process.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without opening a connection; the first request
    /// (or the health check) pays the connection cost, with retries.
    pub fn connect(config: &DbConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(&config.url())?;

        tracing::info!("PostgreSQL connection pool configured");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out a connection, retrying transient failures up to
    /// [`MAX_RETRIES`] times with [`RETRY_DELAY`] between attempts.
    /// Non-transient errors propagate on the first occurrence.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, ServiceError> {
        let mut attempt = 1;
        loop {
            match self.pool.acquire().await {
                Ok(conn) => return Ok(conn),
                Err(e) if is_transient(&e) && attempt < MAX_RETRIES => {
                    tracing::warn!(
                        "Database connection attempt {} failed, retrying in {}s...",
                        attempt,
                        RETRY_DELAY.as_secs()
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(e) if is_transient(&e) => {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        MAX_RETRIES,
                        e
                    );
                    return Err(ServiceError::Connection(e));
                }
                Err(e) => return Err(ServiceError::Database(e)),
            }
        }
    }

    /// Liveness probe: acquire a connection and run a trivial statement.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// Create the shared schema if it does not exist yet.
    ///
    /// `orders` carries no enforced foreign keys: deleting a product must
    /// succeed even when orders still reference it, and the stale
    /// references are kept (current upstream behavior).
    pub async fn init_schema(&self) -> Result<(), ServiceError> {
        let mut conn = self.acquire().await?;
        for statement in [CREATE_USERS_TABLE, CREATE_PRODUCTS_TABLE, CREATE_ORDERS_TABLE] {
            sqlx::query(statement).execute(&mut *conn).await?;
        }
        tracing::info!("Database schema initialized");
        Ok(())
    }
}

/// Failure classes expected to resolve with retry, as opposed to fatal
/// configuration or data errors.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_) => true,
        // 57P03 cannot_connect_now (store starting up), 53300 too_many_connections
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some("57P03") | Some("53300"))
        }
        _ => false,
    }
}

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(80) UNIQUE NOT NULL,
    email VARCHAR(120) UNIQUE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name VARCHAR(120) NOT NULL,
    price NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
    stock INTEGER NOT NULL CHECK (stock >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    product_id INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    total_price NUMERIC(10, 2) NOT NULL,
    status VARCHAR(50) NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let io = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert!(is_transient(&io));
        assert!(is_transient(&sqlx::Error::PoolTimedOut));

        // Data errors are fatal and must not burn the retry budget
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::ColumnNotFound("stock".into())));
    }
}
