use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::{PageParams, Paginated, SellerCreate, SellerResponse, SellerUpdate};
use crate::repository::SellerRepository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route(
            "/:id",
            get(get_seller).put(update_seller).delete(delete_seller),
        )
}

#[derive(Debug, Deserialize)]
struct SellerListParams {
    page: Option<i64>,
    per_page: Option<i64>,
    is_active: Option<bool>,
}

async fn list_sellers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<SellerListParams>,
) -> Result<Json<Paginated<SellerResponse>>, AppError> {
    let (page, per_page) = PageParams {
        page: params.page,
        per_page: params.per_page,
    }
    .resolve()?;

    let repo = SellerRepository::new(state.pool.clone());
    let total = repo.count(params.is_active).await?;
    let items = repo
        .list(
            params.is_active,
            per_page,
            PageParams::offset(page, per_page),
        )
        .await?;

    Ok(Json(Paginated {
        items,
        total,
        page,
        per_page,
    }))
}

async fn create_seller(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(payload): Json<SellerCreate>,
) -> Result<(StatusCode, Json<SellerResponse>), AppError> {
    current_user.require_director()?;
    payload.validate()?;

    let seller = SellerRepository::new(state.pool.clone())
        .create(&payload)
        .await?;

    tracing::info!("Created seller {}", seller.id);
    Ok((
        StatusCode::CREATED,
        Json(SellerResponse::without_stats(seller)),
    ))
}

async fn get_seller(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<SellerResponse>, AppError> {
    let seller = SellerRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller not found"))?;
    Ok(Json(seller))
}

async fn update_seller(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<SellerUpdate>,
) -> Result<Json<SellerResponse>, AppError> {
    current_user.require_director()?;
    payload.validate()?;

    let repo = SellerRepository::new(state.pool.clone());
    let seller = repo
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found("Seller not found"))?;

    // Return the updated row with its read-time aggregates.
    let seller = repo
        .find_by_id(seller.id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller not found"))?;
    Ok(Json(seller))
}

async fn delete_seller(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    current_user.require_director()?;

    let deleted = SellerRepository::new(state.pool.clone()).delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("Seller not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
