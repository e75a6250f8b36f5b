use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::{PageParams, Paginated, SaleCreate, SaleResponse};
use crate::repository::sale_repo::SaleFilter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale))
}

#[derive(Debug, Deserialize)]
struct SaleListParams {
    page: Option<i64>,
    per_page: Option<i64>,
    seller_id: Option<i64>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

async fn list_sales(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<SaleListParams>,
) -> Result<Json<Paginated<SaleResponse>>, AppError> {
    let (page, per_page) = PageParams {
        page: params.page,
        per_page: params.per_page,
    }
    .resolve()?;

    let filter = SaleFilter {
        seller_id: params.seller_id,
        date_from: params.date_from,
        date_to: params.date_to,
    };
    let repo = state.sales.repo();
    let total = repo.count(&filter).await?;
    let items = repo
        .list(&filter, per_page, PageParams::offset(page, per_page))
        .await?;

    Ok(Json(Paginated {
        items,
        total,
        page,
        per_page,
    }))
}

async fn create_sale(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(payload): Json<SaleCreate>,
) -> Result<(StatusCode, Json<SaleResponse>), AppError> {
    payload.validate()?;

    let sale = state.sales.create_sale(&payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn get_sale(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<SaleResponse>, AppError> {
    let sale = state
        .sales
        .repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Sale not found"))?;
    Ok(Json(sale))
}
