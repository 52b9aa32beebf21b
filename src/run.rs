//! Service composition root
//!
//! Opens the offers database, builds the rate cache, and wires both into
//! the refresh task and the webserver.

use crate::config::Config;
use crate::database::OffersDb;
use crate::logger::{self, LogTag};
use crate::rates::{parse_amount, quote_custom, start_refresh_task, RateCache};
use crate::webserver::{self, AppState};
use anyhow::{anyhow, Context};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::{JoinError, JoinHandle};

/// Open the configured offers database, seeding it when allowed
pub fn open_offers_db(config: &Config) -> anyhow::Result<OffersDb> {
    let path = if config.database.path.trim().is_empty() {
        crate::paths::get_offers_db_path()
    } else {
        PathBuf::from(&config.database.path)
    };

    let db = OffersDb::open(
        &path,
        Duration::from_millis(config.database.busy_timeout_ms),
    )
    .with_context(|| format!("Failed to open offers database at {}", path.display()))?;

    if config.rates.seed_if_empty {
        db.seed_defaults().context("Failed to seed default offers")?;
    }

    logger::info(
        LogTag::Database,
        &format!(
            "📦 Offers database ready ({} active offers)",
            db.count_offers()?
        ),
    );
    Ok(db)
}

/// Build the rate cache and attempt the startup load
///
/// A failed startup load is not fatal: the cache stays empty and the
/// converter falls back to base-unit and 1:1 credit until a reload succeeds.
pub async fn build_rate_cache(config: &Config, db: &OffersDb) -> Arc<RateCache> {
    let cache = Arc::new(RateCache::new(Duration::from_secs(
        config.rates.load_timeout_secs,
    )));

    if let Err(e) = cache.load(db).await {
        logger::warning(
            LogTag::Rates,
            &format!("⚠️ Starting with an empty rate table: {}", e),
        );
    }
    cache
}

/// `--quote <amount>`: print the quote as JSON and exit
pub async fn run_quote(config: Config, raw_amount: &str) -> anyhow::Result<()> {
    let amount = parse_amount(raw_amount)?;
    let db = open_offers_db(&config)?;
    let cache = build_rate_cache(&config, &db).await;

    let quote = quote_custom(amount, &cache.snapshot(), config.rates.upsell_count)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

/// Run the service until Ctrl-C or until the webserver fails
pub async fn run_service(config: Config) -> anyhow::Result<()> {
    let db = open_offers_db(&config)?;
    let cache = build_rate_cache(&config, &db).await;

    let refresh_shutdown = Arc::new(Notify::new());
    let refresh_handle = if config.rates.refresh_interval_secs > 0 {
        Some(start_refresh_task(
            Arc::clone(&cache),
            Arc::new(db.clone()),
            Duration::from_secs(config.rates.refresh_interval_secs),
            Arc::clone(&refresh_shutdown),
        ))
    } else {
        logger::info(LogTag::Rates, "Periodic rate refresh disabled");
        None
    };

    let state = Arc::new(AppState::new(config, cache, db));
    let server_shutdown = Arc::new(Notify::new());
    let server_handle = tokio::spawn(webserver::start_server(
        state,
        Arc::clone(&server_shutdown),
    ));

    let server_result =
        wait_for_server(tokio::signal::ctrl_c(), server_handle, server_shutdown).await;

    refresh_shutdown.notify_one();
    if let Some(handle) = refresh_handle {
        if let Err(e) = handle.await {
            logger::warning(
                LogTag::Rates,
                &format!("Refresh task ended abnormally: {}", e),
            );
        }
    }

    server_result
        .context("Webserver task panicked")?
        .map_err(|e| anyhow!(e))?;

    logger::info(LogTag::System, "👋 Kiosk service stopped");
    logger::flush();
    Ok(())
}

/// Wait for the server to end on its own or for `shutdown_signal`
///
/// The server is told to stop once the signal resolves, even when the signal
/// itself failed, so the caller always gets to stop the refresh task too.
async fn wait_for_server<S>(
    shutdown_signal: S,
    mut server_handle: JoinHandle<Result<(), String>>,
    server_shutdown: Arc<Notify>,
) -> Result<Result<(), String>, JoinError>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        signal = shutdown_signal => {
            match signal {
                Ok(()) => logger::info(LogTag::System, "🛑 Shutdown requested"),
                Err(e) => logger::error(
                    LogTag::System,
                    &format!("Failed to listen for Ctrl-C ({}), shutting down", e),
                ),
            }
            server_shutdown.notify_one();
            server_handle.await
        }
        finished = &mut server_handle => finished,
    }
}
