//! Shared application state for the webserver
//!
//! Built by the composition root and handed to every route handler; the
//! rate cache and offers database live here rather than in globals.

use crate::config::Config;
use crate::database::OffersDb;
use crate::rates::RateCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub rate_cache: Arc<RateCache>,

    pub offers: OffersDb,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: Config, rate_cache: Arc<RateCache>, offers: OffersDb) -> Self {
        Self {
            config: Arc::new(config),
            rate_cache,
            offers,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
