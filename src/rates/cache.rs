//! Rate cache with copy-on-reload snapshots
//!
//! Readers clone an `Arc<RateSnapshot>` under a short read lock; `load()`
//! builds a complete new snapshot off-lock and swaps the `Arc` in one write.
//! A reader therefore holds either the old table or the new one, never a mix,
//! and keeps using its copy even if a reload lands mid-request.

use super::source::RateSource;
use super::types::{RateSnapshot, RateTableEntry};
use crate::errors::{KioskError, KioskResult};
use crate::logger::{self, LogTag};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Load statistics for monitoring
#[derive(Debug, Clone, Default, Serialize)]
pub struct RateCacheMetrics {
    pub successful_loads: u64,
    pub failed_loads: u64,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

pub struct RateCache {
    current: RwLock<Arc<RateSnapshot>>,
    load_timeout: Duration,
    metrics: Mutex<RateCacheMetrics>,
}

impl RateCache {
    /// Empty cache; call `load()` to populate it
    pub fn new(load_timeout: Duration) -> Self {
        Self::with_snapshot(RateSnapshot::empty(), load_timeout)
    }

    /// Cache pre-filled with a fabricated snapshot
    pub fn with_snapshot(snapshot: RateSnapshot, load_timeout: Duration) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            load_timeout,
            metrics: Mutex::new(RateCacheMetrics::default()),
        }
    }

    /// Current snapshot for read-only use
    pub fn snapshot(&self) -> Arc<RateSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Reload every tier from `source` and atomically replace the snapshot
    ///
    /// On any failure (source error, timeout, invalid row) the previous
    /// snapshot stays in place and `SourceUnavailable` is returned.
    pub async fn load(&self, source: &dyn RateSource) -> KioskResult<()> {
        logger::debug(
            LogTag::Rates,
            &format!("Loading rate table from '{}'", source.name()),
        );

        let rows: Vec<RateTableEntry> =
            match tokio::time::timeout(self.load_timeout, source.fetch_tiers()).await {
                Ok(Ok(rows)) => rows,
                Ok(Err(e)) => return Err(self.record_failure(source.name(), &e.to_string())),
                Err(_) => {
                    let reason = format!("timed out after {:?}", self.load_timeout);
                    return Err(self.record_failure(source.name(), &reason));
                }
            };

        let snapshot = match RateSnapshot::from_rows(rows) {
            Ok(snapshot) => snapshot,
            Err(reason) => {
                let reason = format!("malformed rows: {}", reason);
                return Err(self.record_failure(source.name(), &reason));
            }
        };

        logger::verbose(
            LogTag::Rates,
            &format!(
                "New tier table: {}",
                snapshot
                    .entries()
                    .iter()
                    .map(|e| format!("{}->{}", e.topup_unit, e.credit_value))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        );

        let tier_count = snapshot.len();
        *self.current.write() = Arc::new(snapshot);

        {
            let mut metrics = self.metrics.lock();
            metrics.successful_loads += 1;
            metrics.last_success_at = Some(Utc::now());
        }

        logger::info(
            LogTag::Rates,
            &format!("✅ Loaded {} tiers from '{}'", tier_count, source.name()),
        );
        Ok(())
    }

    pub fn metrics(&self) -> RateCacheMetrics {
        self.metrics.lock().clone()
    }

    fn record_failure(&self, source_name: &str, reason: &str) -> KioskError {
        let stale_count = self.current.read().len();
        {
            let mut metrics = self.metrics.lock();
            metrics.failed_loads += 1;
            metrics.last_failure_at = Some(Utc::now());
            metrics.last_error = Some(reason.to_string());
        }

        logger::warning(
            LogTag::Rates,
            &format!(
                "⚠️ Rate load from '{}' failed ({}), keeping {} cached tiers",
                source_name, reason, stale_count
            ),
        );
        KioskError::source_unavailable(format!("{}: {}", source_name, reason))
    }
}
