//! Rate cache inspection and manual refresh

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::rates::{RateCacheMetrics, RateTableEntry};
use crate::webserver::{
    state::AppState,
    utils::{error_response, success_response},
};

#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub tiers: Vec<RateTableEntry>,
    pub count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub metrics: RateCacheMetrics,
}

fn current_rates(state: &AppState) -> RatesResponse {
    let snapshot = state.rate_cache.snapshot();
    RatesResponse {
        tiers: snapshot.entries().to_vec(),
        count: snapshot.len(),
        loaded_at: snapshot.loaded_at(),
        metrics: state.rate_cache.metrics(),
    }
}

/// GET /api/rates - Current cached tier table
async fn get_rates(State(state): State<Arc<AppState>>) -> Response {
    success_response(current_rates(&state))
}

/// POST /api/rates/refresh - Reload the cache from the offers table
///
/// On failure the stale table keeps serving and is reported in `details`.
async fn refresh_rates(State(state): State<Arc<AppState>>) -> Response {
    logger::info(LogTag::Webserver, "Manual rate refresh requested");

    match state.rate_cache.load(&state.offers).await {
        Ok(()) => success_response(current_rates(&state)),
        Err(e) => {
            let stale = current_rates(&state);
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "source_unavailable",
                &e.to_string(),
                Some(serde_json::json!({
                    "stale_count": stale.count,
                    "loaded_at": stale.loaded_at,
                })),
            )
        }
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rates", get(get_rates))
        .route("/rates/refresh", post(refresh_rates))
}
