use std::sync::Arc;

use learnpath_core::recommendation::{EngineConfig, RecommendationEngine};
use learnpath_db::{DbPool, PgLearningStore};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Recommendation engine wired to the Postgres store.
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgLearningStore::new(pool.clone()));
        let engine = RecommendationEngine::new(
            store.clone(),
            store.clone(),
            store,
            EngineConfig {
                recent_activity_window_days: config.recent_activity_window_days,
            },
        );

        Self {
            pool,
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
