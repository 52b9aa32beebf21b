//! Rate source abstraction
//!
//! The cache only knows the store through this trait, so tests can hand it
//! fabricated or failing sources.

use super::types::RateTableEntry;
use crate::errors::KioskResult;
use async_trait::async_trait;

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Name used in log lines and error messages
    fn name(&self) -> &'static str;

    /// Read every available tier
    ///
    /// Implementations should return rows ascending by `topup_unit`, but the
    /// cache sorts again and does not rely on it.
    async fn fetch_tiers(&self) -> KioskResult<Vec<RateTableEntry>>;
}
