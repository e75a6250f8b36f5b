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
use crate::models::{Client, ClientCreate, ClientUpdate, PageParams, Paginated};
use crate::repository::ClientRepository;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

#[derive(Debug, Deserialize)]
struct ClientListParams {
    page: Option<i64>,
    per_page: Option<i64>,
    search: Option<String>,
}

async fn list_clients(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(params): Query<ClientListParams>,
) -> Result<Json<Paginated<Client>>, AppError> {
    let (page, per_page) = PageParams {
        page: params.page,
        per_page: params.per_page,
    }
    .resolve()?;

    let repo = ClientRepository::new(state.pool.clone());
    let total = repo.count(params.search.as_deref()).await?;
    let items = repo
        .list(
            params.search.as_deref(),
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

async fn create_client(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(payload): Json<ClientCreate>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    payload.validate()?;

    let client = ClientRepository::new(state.pool.clone())
        .create(&payload)
        .await?;

    tracing::info!("Created client {}", client.id);
    Ok((StatusCode::CREATED, Json(client)))
}

async fn get_client(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Client>, AppError> {
    let client = ClientRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;
    Ok(Json(client))
}

async fn update_client(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> Result<Json<Client>, AppError> {
    payload.validate()?;

    let client = ClientRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;
    Ok(Json(client))
}

async fn delete_client(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = ClientRepository::new(state.pool.clone()).delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("Client not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
