use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::{User, UserRole};
use crate::repository::UserRepository;
use crate::state::AppState;

/// Resolves the calling user from the `Authorization: Bearer` header.
///
/// Rejects with 401 when the token is missing, malformed, expired, not an
/// access token, or when the user no longer exists or has been deactivated.
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Only directors may manage sellers and register users.
    pub fn require_director(&self) -> Result<(), AppError> {
        if self.0.role != UserRole::Director {
            return Err(AppError::Forbidden("Director role required".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header"))?;

        let claims = state.jwt.validate(token)?;
        if !claims.is_access() {
            return Err(AppError::unauthorized("Invalid token"));
        }
        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

        let user = UserRepository::new(state.pool.clone())
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;
        if !user.is_active {
            return Err(AppError::unauthorized("User is inactive"));
        }

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_role(role: UserRole) -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: None,
            hashed_password: String::new(),
            full_name: None,
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn manager_cannot_pass_director_gate() {
        let current = CurrentUser(user_with_role(UserRole::Manager));
        assert!(matches!(
            current.require_director(),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn director_passes_director_gate() {
        let current = CurrentUser(user_with_role(UserRole::Director));
        assert!(current.require_director().is_ok());
    }
}
