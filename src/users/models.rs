//! User data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ServiceError;

/// User row. Immutable once created except for username/email via
/// explicit update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Create-user request body. Fields are optional at the serde layer so a
/// missing field is a 400, not a deserialization rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl NewUser {
    pub fn validate(self) -> Result<(String, String), ServiceError> {
        match (self.username, self.email) {
            (Some(username), Some(email)) => Ok((username, email)),
            _ => Err(ServiceError::Validation(
                "Missing required fields".to_string(),
            )),
        }
    }
}

/// Partial update: only the fields present are applied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_both_fields() {
        let missing_email: NewUser = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert!(missing_email.validate().is_err());

        let complete: NewUser =
            serde_json::from_str(r#"{"username":"alice","email":"alice@example.com"}"#).unwrap();
        let (username, email) = complete.validate().unwrap();
        assert_eq!(username, "alice");
        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn test_update_emptiness() {
        let empty: UserUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let partial: UserUpdate = serde_json::from_str(r#"{"email":"new@example.com"}"#).unwrap();
        assert!(!partial.is_empty());
    }
}
