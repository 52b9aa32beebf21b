//! Axum webserver implementation
//!
//! Server lifecycle management including startup and graceful termination

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Start the webserver
///
/// Blocks until `shutdown` is notified, then drains in-flight requests.
pub async fn start_server(state: Arc<AppState>, shutdown: Arc<Notify>) -> Result<(), String> {
    let host = state.config.webserver.host.clone();
    let port = state.config.webserver.port;

    logger::debug(
        LogTag::Webserver,
        &format!("🌐 Starting webserver on {}:{}", host, port),
    );

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => format!(
            "Failed to bind to {}: Address already in use\n\
             \n\
             Another kiosk service is probably running on this port.\n\
             Stop it or set a different [webserver] port in config.toml.",
            addr
        ),
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied\n\
             \n\
             Port {} requires elevated privileges on this system.\n\
             Consider using a port above 1024.",
            addr, port
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("✅ Kiosk API listening on http://{}/api", addr),
    );

    let shutdown_signal = async move {
        shutdown.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "✅ Webserver stopped gracefully");

    Ok(())
}

/// Build the Axum application with all routes and middleware
///
/// Kiosk pages are served from another origin, hence the permissive CORS.
pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}
