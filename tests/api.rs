use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tizo_kiosk::{
    config::Config,
    database::{NewOffer, OffersDb},
    rates::RateCache,
    webserver::{build_app, AppState},
};
use tower::ServiceExt;

fn offer(topup_rb: u64, tizo: u64) -> NewOffer {
    NewOffer {
        topup_rb,
        tizo,
        label: None,
    }
}

/// Offers table with the tiers from the documented 1790 Rb example
async fn kiosk_state(load_cache: bool) -> Arc<AppState> {
    let db = OffersDb::open_in_memory().unwrap();
    for (rb, tizo) in [(40, 40), (100, 150), (550, 1020), (600, 1200), (1000, 2100)] {
        db.insert_offer(&offer(rb, tizo)).unwrap();
    }

    let cache = Arc::new(RateCache::new(Duration::from_secs(5)));
    if load_cache {
        cache.load(&db).await.unwrap();
    }

    Arc::new(AppState::new(Config::default(), cache, db))
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    send(build_app(Arc::clone(state)), "GET", uri).await
}

#[tokio::test]
async fn custom_quote_matches_documented_example() {
    let state = kiosk_state(true).await;
    let (status, body) = get(&state, "/api/custom?amount=1790").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["amount"], 1790);
    assert_eq!(body["data"]["tizo"], 3460);
    assert_eq!(body["data"]["breakdown"]["base_units"], 2);

    let upsells = body["data"]["upsells"].as_array().unwrap();
    assert_eq!(upsells.len(), 2);
    assert_eq!(upsells[0]["amount"], 1800);
    assert_eq!(upsells[0]["tizo"], 3600);
    assert_eq!(upsells[1]["amount"], 2400);
    assert_eq!(upsells[1]["tizo"], 4800);
}

#[tokio::test]
async fn custom_quote_rejects_bad_amounts() {
    let state = kiosk_state(true).await;

    for uri in [
        "/api/custom?amount=-5",
        "/api/custom?amount=12.5",
        "/api/custom?amount=abc",
        "/api/custom",
    ] {
        let (status, body) = get(&state, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "invalid_amount");
    }
}

#[tokio::test]
async fn custom_quote_with_empty_cache_is_one_to_one() {
    let state = kiosk_state(false).await;
    let (status, body) = get(&state, "/api/custom?amount=590").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tizo"], 590);

    let (_, health) = get(&state, "/api/health").await;
    assert_eq!(health["data"]["status"], "degraded");
    assert_eq!(health["data"]["cached_tiers"], 0);
}

#[tokio::test]
async fn exact_offer_lookup() {
    let state = kiosk_state(true).await;

    let (status, body) = get(&state, "/api/offers/550").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tizo"], 1020);
    assert_eq!(body["data"]["bonus_percent"], 85);

    let (status, body) = get(&state, "/api/offers/551").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, _) = get(&state, "/api/offers/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn next_two_tiers() {
    let state = kiosk_state(true).await;
    let (status, body) = get(&state, "/api/offers/100/next").await;

    assert_eq!(status, StatusCode::OK);
    let next: Vec<u64> = body["data"]["next"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["topup_rb"].as_u64().unwrap())
        .collect();
    assert_eq!(next, vec![550, 600]);
}

#[tokio::test]
async fn list_offers_ascending() {
    let state = kiosk_state(true).await;
    let (_, body) = get(&state, "/api/offers").await;

    assert_eq!(body["data"]["count"], 5);
    assert_eq!(body["data"]["offers"][0]["topup_rb"], 40);
}

#[tokio::test]
async fn manual_refresh_picks_up_new_offers() {
    let state = kiosk_state(true).await;
    let (_, before) = get(&state, "/api/rates").await;
    assert_eq!(before["data"]["count"], 5);

    state.offers.insert_offer(&offer(300, 520)).unwrap();
    let (status, body) = send(build_app(Arc::clone(&state)), "POST", "/api/rates/refresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 6);
    assert_eq!(body["data"]["metrics"]["successful_loads"], 2);

    // 350 Rb now uses the 300 tier: 520 + 50
    let (_, quote) = get(&state, "/api/custom?amount=350").await;
    assert_eq!(quote["data"]["tizo"], 570);
}

#[tokio::test]
async fn failed_refresh_keeps_stale_rates() {
    let state = kiosk_state(true).await;

    // 200 Rb for 100 Tizo breaks the bonus-only invariant
    state.offers.insert_offer(&offer(200, 100)).unwrap();
    let (status, body) = send(build_app(Arc::clone(&state)), "POST", "/api/rates/refresh").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "source_unavailable");
    assert_eq!(body["error"]["details"]["stale_count"], 5);

    let (_, quote) = get(&state, "/api/custom?amount=1790").await;
    assert_eq!(quote["data"]["tizo"], 3460);
}
