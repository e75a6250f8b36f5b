use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{Car, Client, Seller};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub car_id: i64,
    pub client_id: i64,
    pub seller_id: i64,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaleCreate {
    pub car_id: i64,
    pub client_id: i64,
    pub seller_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "sale_price must be positive"))]
    pub sale_price: f64,
}

/// Sale with its related car, client, and seller expanded via explicit joins.
#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub car_id: i64,
    pub client_id: i64,
    pub seller_id: i64,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub car: Car,
    pub client: Client,
    pub seller: Seller,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_sale_price_is_rejected() {
        let payload: SaleCreate = serde_json::from_str(
            r#"{"car_id": 1, "client_id": 2, "seller_id": 3, "sale_price": 0.0}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: SaleCreate = serde_json::from_str(
            r#"{"car_id": 1, "client_id": 2, "seller_id": 3, "sale_price": 1500.0}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
