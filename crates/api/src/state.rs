use std::sync::Arc;

use folio_db::DbPool;

use crate::config::ServerConfig;

/// State shared by every handler through `State<AppState>`.
///
/// Workflow operations take `&state.pool`; the identity extractors read
/// `state.config.jwt`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
