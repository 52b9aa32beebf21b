use crate::webserver::state::AppState;
use axum::Router;
use std::sync::Arc;

pub mod offers;
pub mod rates;
pub mod system;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(system::routes())
        .merge(offers::routes())
        .merge(rates::routes())
}
