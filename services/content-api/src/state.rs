//! Application state for the Content API service.

use contentmux_core::UsageGuard;
use contentmux_db::pg::{PgUsageRepository, PgUserRepository, Repositories};
use contentmux_db::DbPool;
use std::sync::Arc;

use crate::config::Config;

/// Usage guard over the PostgreSQL repositories
pub type Guard = UsageGuard<PgUserRepository, PgUsageRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Tier lookups and usage gating
    pub guard: Arc<Guard>,
    /// Database repositories
    pub repos: Repositories,
    /// Database pool (readiness checks)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repos: Repositories, pool: DbPool, config: Config) -> Self {
        let guard = UsageGuard::with_cache_duration(
            Arc::new(repos.users.clone()),
            Arc::new(repos.usage.clone()),
            config.tier_cache_ttl,
        );

        Self {
            guard: Arc::new(guard),
            repos,
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
