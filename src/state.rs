use std::fmt;
use std::sync::Arc;

use rollcall_config::{CorsConfig, JwtConfig, StoreBackend, StoreConfig};
use rollcall_db::{MemoryStore, PgStore, Store, StoreResult};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Builds the store selected by `STORE_BACKEND` / `DATABASE_URL`.
pub async fn init_store(config: &StoreConfig) -> StoreResult<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        StoreBackend::Postgres => Arc::new(PgStore::connect(config).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    info!(backend = store.backend_name(), "Store initialized");
    Ok(store)
}
