//! Rate table types shared by the cache, the converter and the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One top-up tier: paying `topup_unit` Rb awards `credit_value` Tizo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableEntry {
    pub topup_unit: u64,
    pub credit_value: u64,
}

impl RateTableEntry {
    pub fn new(topup_unit: u64, credit_value: u64) -> Self {
        Self {
            topup_unit,
            credit_value,
        }
    }

    /// Tier never awards less credit than the Rb it consumes
    pub fn is_bonus_only(&self) -> bool {
        self.credit_value >= self.topup_unit
    }

    /// Check the loaded-data invariants for a single row
    pub fn validate(&self) -> Result<(), String> {
        if self.topup_unit == 0 {
            return Err("tier with topup_unit 0".to_string());
        }
        if !self.is_bonus_only() {
            return Err(format!(
                "tier {} Rb awards only {} Tizo (credit below top-up)",
                self.topup_unit, self.credit_value
            ));
        }
        Ok(())
    }
}

/// Immutable, ascending-by-`topup_unit` view of the rate table
///
/// A snapshot is never modified after construction; reloading the cache
/// builds a new one and swaps it in whole.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RateSnapshot {
    entries: Vec<RateTableEntry>,
    loaded_at: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    /// Snapshot with no tiers (process start, before the first load)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate rows and sort them ascending by `topup_unit`
    ///
    /// Sorting is stable, so rows sharing a unit keep their source order.
    /// Any invalid row rejects the whole batch.
    pub fn from_rows(mut rows: Vec<RateTableEntry>) -> Result<Self, String> {
        for row in &rows {
            row.validate()?;
        }
        rows.sort_by_key(|row| row.topup_unit);

        Ok(Self {
            entries: rows,
            loaded_at: Some(Utc::now()),
        })
    }

    pub fn entries(&self) -> &[RateTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When this snapshot was built from source rows (`None` for the initial empty one)
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Up to `limit` distinct tier units strictly above `amount`, ascending
    pub fn units_above(&self, amount: u64, limit: usize) -> Vec<u64> {
        let mut units: Vec<u64> = Vec::with_capacity(limit);
        for entry in self.entries.iter().filter(|e| e.topup_unit > amount) {
            if units.len() == limit {
                break;
            }
            if units.last() != Some(&entry.topup_unit) {
                units.push(entry.topup_unit);
            }
        }
        units
    }
}
