pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod state;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use state::AppState;

/// Build the full application router with the versioned API prefix.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    Router::new()
        .merge(handlers::health::router())
        .nest("/api/v1/auth", handlers::auth::router())
        .nest("/api/v1/cars", handlers::cars::router())
        .nest("/api/v1/clients", handlers::clients::router())
        .nest("/api/v1/sellers", handlers::sellers::router())
        .nest("/api/v1/sales", handlers::sales::router())
        .nest("/api/v1/reports", handlers::reports::router())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
