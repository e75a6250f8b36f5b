use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Seller {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Seller with read-time sales aggregates. `sales_count` and `total_revenue`
/// are computed per request, never stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SellerResponse {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub is_active: bool,
    pub sales_count: i64,
    pub total_revenue: f64,
    pub created_at: DateTime<Utc>,
}

impl SellerResponse {
    pub fn without_stats(seller: Seller) -> Self {
        SellerResponse {
            id: seller.id,
            full_name: seller.full_name,
            phone: seller.phone,
            is_active: seller.is_active,
            sales_count: 0,
            total_revenue: 0.0,
            created_at: seller.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SellerCreate {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct SellerUpdate {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_to_active() {
        let payload: SellerCreate =
            serde_json::from_str(r#"{"full_name": "John", "phone": "+100"}"#).unwrap();
        assert!(payload.is_active);
    }

    #[test]
    fn fresh_seller_has_zero_stats() {
        let seller = Seller {
            id: 1,
            full_name: "John".to_string(),
            phone: "+100".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        let response = SellerResponse::without_stats(seller);
        assert_eq!(response.sales_count, 0);
        assert_eq!(response.total_revenue, 0.0);
    }
}
