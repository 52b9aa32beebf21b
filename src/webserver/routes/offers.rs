//! Offer lookup and custom-amount quote routes

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::database::{Offer, OffersDb};
use crate::errors::{KioskError, KioskResult};
use crate::logger::{self, LogTag};
use crate::rates::{parse_amount, quote_custom};
use crate::webserver::{
    state::AppState,
    utils::{kiosk_error_response, success_response},
};

/// Number of tiers returned by the "next tiers" lookup
const NEXT_TIER_COUNT: usize = 2;

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub id: i64,
    pub topup_rb: u64,
    pub tizo: u64,
    pub label: Option<String>,
    pub bonus_percent: u64,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        Self {
            bonus_percent: offer.bonus_percent(),
            id: offer.id,
            topup_rb: offer.topup_rb,
            tizo: offer.tizo,
            label: offer.label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OffersListResponse {
    pub offers: Vec<OfferResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct NextTiersResponse {
    pub topup_rb: u64,
    pub next: Vec<OfferResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CustomQuery {
    pub amount: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Run an offers query on the blocking pool
///
/// SQLite calls and the shared connection lock stay off the async workers.
async fn query_offers<T, F>(state: &AppState, query: F) -> KioskResult<T>
where
    T: Send + 'static,
    F: FnOnce(&OffersDb) -> KioskResult<T> + Send + 'static,
{
    let db = state.offers.clone();
    tokio::task::spawn_blocking(move || query(&db))
        .await
        .map_err(|e| KioskError::Internal(format!("offers query task failed: {}", e)))?
}

/// GET /api/offers - All active offers, ascending
async fn list_offers(State(state): State<Arc<AppState>>) -> Response {
    match query_offers(&state, |db| db.list_offers()).await {
        Ok(offers) => {
            let offers: Vec<OfferResponse> = offers.into_iter().map(Into::into).collect();
            let count = offers.len();
            success_response(OffersListResponse { offers, count })
        }
        Err(e) => {
            logger::error(LogTag::Offers, &format!("Failed to list offers: {}", e));
            kiosk_error_response(&e)
        }
    }
}

/// GET /api/offers/:topup - Offer for an exact top-up amount
async fn get_offer(State(state): State<Arc<AppState>>, Path(topup): Path<String>) -> Response {
    let topup = match parse_amount(&topup) {
        Ok(amount) => amount as u64,
        Err(e) => return kiosk_error_response(&e),
    };

    match query_offers(&state, move |db| db.find_by_topup(topup)).await {
        Ok(Some(offer)) => success_response(OfferResponse::from(offer)),
        Ok(None) => kiosk_error_response(&KioskError::NotFound(format!(
            "no offer for {} Rb",
            topup
        ))),
        Err(e) => {
            logger::error(LogTag::Offers, &format!("Offer lookup failed: {}", e));
            kiosk_error_response(&e)
        }
    }
}

/// GET /api/offers/:topup/next - The next tiers above a top-up amount
async fn get_next_tiers(
    State(state): State<Arc<AppState>>,
    Path(topup): Path<String>,
) -> Response {
    let topup = match parse_amount(&topup) {
        Ok(amount) => amount as u64,
        Err(e) => return kiosk_error_response(&e),
    };

    match query_offers(&state, move |db| db.next_tiers_above(topup, NEXT_TIER_COUNT)).await {
        Ok(offers) => success_response(NextTiersResponse {
            topup_rb: topup,
            next: offers.into_iter().map(Into::into).collect(),
        }),
        Err(e) => {
            logger::error(LogTag::Offers, &format!("Next-tier lookup failed: {}", e));
            kiosk_error_response(&e)
        }
    }
}

/// GET /api/custom?amount=N - Converted Tizo plus upsell suggestions
async fn get_custom_quote(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomQuery>,
) -> Response {
    let amount = match parse_amount(params.amount.as_deref().unwrap_or("")) {
        Ok(amount) => amount,
        Err(e) => {
            logger::debug(LogTag::Offers, &format!("Rejected custom amount: {}", e));
            return kiosk_error_response(&e);
        }
    };

    let snapshot = state.rate_cache.snapshot();
    match quote_custom(amount, &snapshot, state.config.rates.upsell_count) {
        Ok(quote) => {
            logger::debug(
                LogTag::Converter,
                &format!(
                    "{} Rb -> {} Tizo ({} cached tiers)",
                    quote.amount,
                    quote.tizo,
                    snapshot.len()
                ),
            );
            success_response(quote)
        }
        Err(e) => kiosk_error_response(&e),
    }
}

/// Offer routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/offers", get(list_offers))
        .route("/offers/:topup", get(get_offer))
        .route("/offers/:topup/next", get(get_next_tiers))
        .route("/custom", get(get_custom_quote))
}
