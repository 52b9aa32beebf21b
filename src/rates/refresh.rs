//! Periodic background reload of the rate cache

use super::cache::RateCache;
use super::source::RateSource;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the refresh loop
///
/// Reloads every `interval` until `shutdown` is notified. The first reload
/// happens one interval after start; the startup load is the caller's job.
/// Failures are logged by the cache and the loop keeps going on stale data.
pub fn start_refresh_task(
    cache: Arc<RateCache>,
    source: Arc<dyn RateSource>,
    interval: Duration,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        logger::info(
            LogTag::Rates,
            &format!("🔄 Rate refresh every {}s", interval.as_secs()),
        );

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    logger::info(LogTag::Rates, "Rate refresh task stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if cache.load(source.as_ref()).await.is_err() {
                        logger::debug(
                            LogTag::Rates,
                            "Scheduled reload failed, next attempt on the following tick",
                        );
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::source::testing::StaticRateSource;
    use crate::rates::types::RateTableEntry;

    #[tokio::test(start_paused = true)]
    async fn test_picks_up_new_rows_and_stops() {
        let cache = Arc::new(RateCache::new(Duration::from_secs(5)));
        let source = Arc::new(StaticRateSource::new(vec![RateTableEntry::new(100, 150)]));
        let shutdown = Arc::new(Notify::new());

        let handle = start_refresh_task(
            Arc::clone(&cache),
            source.clone(),
            Duration::from_secs(60),
            Arc::clone(&shutdown),
        );

        // Nothing happens before the first interval
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(cache.snapshot().is_empty());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(cache.snapshot().len(), 1);

        source.set_rows(vec![RateTableEntry::new(100, 150), RateTableEntry::new(200, 320)]);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(cache.snapshot().len(), 2);

        shutdown.notify_one();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_keep_stale_table() {
        let cache = Arc::new(RateCache::new(Duration::from_secs(5)));
        let source = Arc::new(StaticRateSource::new(vec![RateTableEntry::new(100, 150)]));
        cache.load(source.as_ref()).await.unwrap();
        source.fail("database locked");

        let shutdown = Arc::new(Notify::new());
        let handle = start_refresh_task(
            Arc::clone(&cache),
            source.clone(),
            Duration::from_secs(10),
            Arc::clone(&shutdown),
        );

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(cache.snapshot().len(), 1);
        assert_eq!(cache.metrics().failed_loads, 3);

        shutdown.notify_one();
        handle.await.unwrap();
    }
}
