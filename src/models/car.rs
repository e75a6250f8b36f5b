use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "car_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Available,
    Sold,
    Reserved,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub price: f64,
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CarCreate {
    #[validate(length(equal = 17, message = "VIN must be exactly 17 characters"))]
    pub vin: String,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,
    pub color: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[serde(default = "default_status")]
    pub status: CarStatus,
}

fn default_status() -> CarStatus {
    CarStatus::Available
}

/// Partial update: only supplied fields are changed. An explicit `null` is
/// treated the same as an omitted field; nullable columns such as `color`
/// cannot be cleared through this endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct CarUpdate {
    pub brand: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,
    pub color: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: Option<f64>,
    pub status: Option<CarStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CarCreate {
        serde_json::from_value(serde_json::json!({
            "vin": "WVWZZZ3CZWE123456",
            "brand": "Volkswagen",
            "model": "Tiguan",
            "year": 2024,
            "color": "White",
            "price": 35000.0
        }))
        .unwrap()
    }

    #[test]
    fn valid_payload_passes_and_defaults_to_available() {
        let payload = valid_create();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.status, CarStatus::Available);
    }

    #[test]
    fn short_vin_is_rejected() {
        let mut payload = valid_create();
        payload.vin = "TOOSHORT".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn year_out_of_range_is_rejected() {
        let mut payload = valid_create();
        payload.year = 1899;
        assert!(payload.validate().is_err());
        payload.year = 2031;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut payload = valid_create();
        payload.price = 0.0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_status_is_rejected_at_deserialization() {
        assert!(serde_json::from_str::<CarStatus>("\"scrapped\"").is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        let update: CarUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.validate().is_ok());
        assert!(update.brand.is_none());
    }

    #[test]
    fn explicit_null_deserializes_like_an_omitted_field() {
        let update: CarUpdate = serde_json::from_str(r#"{"color": null}"#).unwrap();
        assert!(update.color.is_none());
    }
}
