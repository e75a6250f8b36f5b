use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{hash_password, verify_password, CurrentUser, TokenPair};
use crate::error::{conflict_on_unique, AppError};
use crate::models::{UserCreate, UserResponse};
use crate::repository::UserRepository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/register", post(register))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RefreshTokenRequest {
    refresh_token: String,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    // One error for every failure mode so the response does not reveal
    // whether the username exists.
    let invalid = || AppError::unauthorized("Invalid credentials");

    let user = UserRepository::new(state.pool.clone())
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(invalid)?;
    if !user.is_active {
        return Err(invalid());
    }
    if !verify_password(&payload.password, &user.hashed_password) {
        return Err(invalid());
    }

    tracing::info!("User {} logged in", user.username);
    Ok(Json(state.jwt.issue_pair_for(&user)?))
}

async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let user_id = state.jwt.validate_refresh(&payload.refresh_token)?;

    // Re-read the user so a deactivated account cannot keep refreshing, and
    // so role changes take effect on the next pair.
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid token"))?;
    if !user.is_active {
        return Err(AppError::unauthorized("User is inactive"));
    }

    Ok(Json(state.jwt.issue_pair_for(&user)?))
}

async fn register(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    current_user.require_director()?;
    payload.validate()?;

    let hashed = hash_password(&payload.password)?;
    let user = UserRepository::new(state.pool.clone())
        .create(
            &payload.username,
            payload.email.as_deref(),
            &hashed,
            payload.full_name.as_deref(),
            payload.role,
        )
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already exists"))?;

    tracing::info!("Registered user {} ({})", user.username, user.role);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn me(current_user: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(current_user.0))
}
