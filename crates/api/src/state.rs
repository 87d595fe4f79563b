use std::sync::Arc;

use bloom_db::repositories::PgProductStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bloom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Product reader over the shared pool.
    pub fn products(&self) -> PgProductStore {
        PgProductStore::new(self.pool.clone())
    }
}
