use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::{
    DashboardResponse, SalesByCarResponse, SalesByDateResponse, SalesBySellerResponse,
};
use crate::repository::report_repo::{fill_daily_series, CHART_DAYS};
use crate::repository::ReportRepository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/sales-by-date", get(sales_by_date))
        .route("/sales-by-seller", get(sales_by_seller))
        .route("/sales-by-car", get(sales_by_car))
}

#[derive(Debug, Deserialize)]
struct DateRangeParams {
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

async fn dashboard(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let repo = ReportRepository::new(state.pool.clone());

    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let (sales_today, revenue_today) = repo.day_stats(today).await?;
    let (sales_month, revenue_month) = repo.stats_since(month_start).await?;
    let cars_available = repo.available_cars().await?;
    let top_sellers = repo.top_sellers(month_start, 5).await?;

    let chart_start = today - Duration::days(CHART_DAYS - 1);
    let rows = repo.daily_series(chart_start, today).await?;
    let sales_chart = fill_daily_series(today, CHART_DAYS, &rows);

    Ok(Json(DashboardResponse {
        sales_today,
        sales_month,
        revenue_today,
        revenue_month,
        cars_available,
        cars_sold_month: sales_month,
        top_sellers,
        sales_chart,
    }))
}

async fn sales_by_date(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<SalesByDateResponse>, AppError> {
    let (Some(date_from), Some(date_to)) = (params.date_from, params.date_to) else {
        return Err(AppError::Validation(
            "date_from and date_to are required".to_string(),
        ));
    };

    let data = ReportRepository::new(state.pool.clone())
        .sales_by_date(date_from, date_to)
        .await?;

    Ok(Json(SalesByDateResponse {
        period: format!("{} - {}", date_from, date_to),
        data,
    }))
}

async fn sales_by_seller(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<SalesBySellerResponse>, AppError> {
    let data = ReportRepository::new(state.pool.clone())
        .sales_by_seller(params.date_from, params.date_to)
        .await?;
    Ok(Json(SalesBySellerResponse { data }))
}

async fn sales_by_car(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<SalesByCarResponse>, AppError> {
    let data = ReportRepository::new(state.pool.clone())
        .sales_by_car(params.date_from, params.date_to)
        .await?;
    Ok(Json(SalesByCarResponse { data }))
}
