//! Product data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ServiceError;

/// Product row. `stock >= 0` is enforced by the order workflow before
/// any decrement commits, and by a CHECK constraint as the last line.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Unit price, non-negative decimal.
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    /// Count of sellable units.
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Create-product request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

impl NewProduct {
    pub fn validate(self) -> Result<(String, Decimal, i32), ServiceError> {
        match (self.name, self.price, self.stock) {
            (Some(name), Some(price), Some(stock)) => Ok((name, price, stock)),
            _ => Err(ServiceError::Validation(
                "Missing required fields".to_string(),
            )),
        }
    }
}

/// Partial update: only the fields present are applied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_product_requires_all_fields() {
        let missing_stock: NewProduct =
            serde_json::from_str(r#"{"name":"Widget","price":19.99}"#).unwrap();
        assert!(missing_stock.validate().is_err());

        let complete: NewProduct =
            serde_json::from_str(r#"{"name":"Widget","price":19.99,"stock":100}"#).unwrap();
        let (name, price, stock) = complete.validate().unwrap();
        assert_eq!(name, "Widget");
        assert_eq!(price, Decimal::from_str("19.99").unwrap());
        assert_eq!(stock, 100);
    }

    #[test]
    fn test_price_accepts_string_body() {
        // Decimal deserializes from both JSON numbers and strings
        let from_string: NewProduct =
            serde_json::from_str(r#"{"name":"Widget","price":"19.99","stock":1}"#).unwrap();
        assert_eq!(from_string.price, Decimal::from_str("19.99").ok());
    }

    #[test]
    fn test_update_emptiness() {
        let empty: ProductUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let stock_only: ProductUpdate = serde_json::from_str(r#"{"stock":5}"#).unwrap();
        assert!(!stock_only.is_empty());
    }
}
