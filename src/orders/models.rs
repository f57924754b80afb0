//! Order data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ServiceError;

/// Order row. `total_price` is frozen at creation time; `status` starts
/// as `pending` and is overwritten freely by the status update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "59.97")]
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order joined with the referenced username and product name, returned
/// by the read operations.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct OrderDetails {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "59.97")]
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub product_name: String,
}

/// Create-order request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrder {
    pub user_id: Option<i32>,
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// A request that passed presence and positivity checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidNewOrder {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl NewOrder {
    pub fn validate(self) -> Result<ValidNewOrder, ServiceError> {
        let (Some(user_id), Some(product_id), Some(quantity)) =
            (self.user_id, self.product_id, self.quantity)
        else {
            return Err(ServiceError::Validation(
                "Missing required fields".to_string(),
            ));
        };
        if quantity <= 0 {
            return Err(ServiceError::Validation(
                "Quantity must be a positive number".to_string(),
            ));
        }
        Ok(ValidNewOrder {
            user_id,
            product_id,
            quantity,
        })
    }
}

/// Status update body. Any string is accepted - the status domain is
/// deliberately open, and no transition rules apply.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

impl StatusUpdate {
    pub fn validate(self) -> Result<String, ServiceError> {
        self.status
            .ok_or_else(|| ServiceError::Validation("Status field required".to_string()))
    }
}

/// `product.price * quantity`, exact in the currency's native precision.
pub(crate) fn total_price(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_order_requires_all_fields() {
        let missing: NewOrder = serde_json::from_str(r#"{"user_id":1,"quantity":2}"#).unwrap();
        assert!(missing.validate().is_err());

        let complete: NewOrder =
            serde_json::from_str(r#"{"user_id":1,"product_id":2,"quantity":3}"#).unwrap();
        let valid = complete.validate().unwrap();
        assert_eq!(valid.quantity, 3);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        for qty in [0, -1, -100] {
            let order = NewOrder {
                user_id: Some(1),
                product_id: Some(1),
                quantity: Some(qty),
            };
            let err = order.validate().unwrap_err();
            assert_eq!(err.to_string(), "Quantity must be a positive number");
        }
    }

    #[test]
    fn test_status_presence() {
        let missing: StatusUpdate = serde_json::from_str("{}").unwrap();
        assert!(missing.validate().is_err());

        let arbitrary: StatusUpdate =
            serde_json::from_str(r#"{"status":"anything goes"}"#).unwrap();
        assert_eq!(arbitrary.validate().unwrap(), "anything goes");
    }

    #[test]
    fn test_total_price_is_exact() {
        let price = Decimal::from_str("19.99").unwrap();
        assert_eq!(total_price(price, 3), Decimal::from_str("59.97").unwrap());
        assert_eq!(total_price(price, 1), price);

        // No float rounding: 0.10 * 3 is exactly 0.30
        let dime = Decimal::from_str("0.10").unwrap();
        assert_eq!(total_price(dime, 3), Decimal::from_str("0.30").unwrap());
    }
}
