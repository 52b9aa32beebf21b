//! Health endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::webserver::{state::AppState, utils::success_response};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub cached_tiers: usize,
}

/// GET /api/health
///
/// Reports "degraded" while the rate cache is empty; conversions still work
/// then, just without the tier bonuses.
async fn health(State(state): State<Arc<AppState>>) -> Response {
    let cached_tiers = state.rate_cache.snapshot().len();
    let status = if cached_tiers > 0 { "ok" } else { "degraded" };

    success_response(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        cached_tiers,
    })
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
