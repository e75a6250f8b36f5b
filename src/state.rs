use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtManager;
use crate::config::Config;
use crate::service::SaleService;

/// Shared application state, constructed once at startup and injected into
/// every handler. No hidden globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtManager,
    pub sales: SaleService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let jwt = JwtManager::new(
            config.secret_key.as_bytes(),
            config.access_ttl_secs(),
            config.refresh_ttl_secs(),
        );
        Self {
            sales: SaleService::new(pool.clone()),
            pool,
            config: Arc::new(config),
            jwt,
        }
    }
}
