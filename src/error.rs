//! Error taxonomy shared by all three services.
//!
//! Every failure surfaces to the client as `{"error": "<message>"}` with
//! the status code below. Internal error text is deliberately passed
//! through on 500s for compatibility with the existing deployment.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or malformed required fields, empty update set.
    #[error("{0}")]
    Validation(String),

    /// No row for the given identifier. Holds the resource name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique-constraint violation on insert.
    #[error("{0}")]
    Conflict(String),

    /// Requested quantity exceeds the product's current stock.
    #[error("Insufficient stock")]
    InsufficientStock,

    /// Store unreachable after the retry budget was exhausted.
    #[error("Database connection failed: {0}")]
    Connection(sqlx::Error),

    /// Any other store failure; aborts the whole operation.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InsufficientStock => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Connection(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::Validation("Missing required fields".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("Product").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Conflict("Username or email already exists".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::InsufficientStock.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ServiceError::NotFound("Order").to_string(),
            "Order not found"
        );
        assert_eq!(
            ServiceError::InsufficientStock.to_string(),
            "Insufficient stock"
        );
        assert_eq!(
            ServiceError::Validation("Status field required".into()).to_string(),
            "Status field required"
        );
    }
}
