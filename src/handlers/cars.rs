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
use crate::error::{conflict_on_unique, AppError};
use crate::models::{Car, CarCreate, CarStatus, CarUpdate, PageParams, Paginated};
use crate::repository::car_repo::CarFilter;
use crate::repository::CarRepository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
}

#[derive(Debug, Deserialize)]
struct CarListParams {
    page: Option<i64>,
    per_page: Option<i64>,
    status: Option<CarStatus>,
    brand: Option<String>,
    search: Option<String>,
}

async fn list_cars(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<CarListParams>,
) -> Result<Json<Paginated<Car>>, AppError> {
    let (page, per_page) = PageParams {
        page: params.page,
        per_page: params.per_page,
    }
    .resolve()?;

    let filter = CarFilter {
        status: params.status,
        brand: params.brand,
        search: params.search,
    };
    let repo = CarRepository::new(state.pool.clone());
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

async fn create_car(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(payload): Json<CarCreate>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    payload.validate()?;

    let car = CarRepository::new(state.pool.clone())
        .create(&payload)
        .await
        .map_err(|e| conflict_on_unique(e, "VIN already exists"))?;

    tracing::info!("Created car {} (VIN {})", car.id, car.vin);
    Ok((StatusCode::CREATED, Json(car)))
}

async fn get_car(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Car>, AppError> {
    let car = CarRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Car not found"))?;
    Ok(Json(car))
}

async fn update_car(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CarUpdate>,
) -> Result<Json<Car>, AppError> {
    payload.validate()?;

    let car = CarRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found("Car not found"))?;
    Ok(Json(car))
}

async fn delete_car(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = CarRepository::new(state.pool.clone()).delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("Car not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
