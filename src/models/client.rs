use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub document_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub document_id: Option<String>,
}

/// Partial update: only supplied fields are changed. An explicit `null` is
/// treated the same as an omitted field; `email` and `document_id` cannot be
/// cleared through this endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientUpdate {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub document_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_phone() {
        let payload: Result<ClientCreate, _> = serde_json::from_str(r#"{"full_name": "Jane"}"#);
        assert!(payload.is_err());

        let payload: ClientCreate =
            serde_json::from_str(r#"{"full_name": "Jane", "phone": "+100"}"#).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn null_update_fields_read_as_not_supplied() {
        let update: ClientUpdate =
            serde_json::from_str(r#"{"email": null, "document_id": null}"#).unwrap();
        assert!(update.email.is_none());
        assert!(update.document_id.is_none());
    }

    #[test]
    fn bad_email_is_rejected() {
        let payload: ClientCreate = serde_json::from_str(
            r#"{"full_name": "Jane", "phone": "+100", "email": "not-an-email"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
