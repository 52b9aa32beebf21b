//! Tiered Rb -> Tizo conversion for custom top-up amounts
//!
//! Three cascading steps, always in this order:
//! 1. Every full 600 Rb awards a flat 1200 Tizo.
//! 2. The remainder is paid out greedily from the cached tiers below 600 Rb,
//!    largest unit first.
//! 3. Whatever is still left converts 1:1.
//!
//! Step 2 is greedy, not optimal.

use super::types::{RateSnapshot, RateTableEntry};
use crate::errors::{KioskError, KioskResult};
use serde::Serialize;
use std::cmp::Ordering;

/// Base denomination applied before any cached tier
pub const BASE_UNIT: u64 = 600;

/// Credit for one base unit (fixed 100% bonus, not taken from the rate table)
pub const BASE_CREDIT: u64 = 1200;

/// One cached tier applied `count` times during the greedy pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierApplication {
    pub topup_unit: u64,
    pub credit_value: u64,
    pub count: u64,
}

/// Step-by-step result of a conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub amount: u64,
    pub base_units: u64,
    pub base_credit: u64,
    pub tiers: Vec<TierApplication>,
    /// Rb left after the greedy pass, awarded 1:1
    pub residual: u64,
    pub total: u64,
}

/// Parse a client-supplied amount
///
/// Accepts only whole, non-negative numbers (surrounding whitespace allowed).
pub fn parse_amount(raw: &str) -> KioskResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KioskError::invalid_amount("amount is required"));
    }

    let amount: i64 = trimmed.parse().map_err(|_| {
        KioskError::invalid_amount(format!("'{}' is not a whole number", trimmed))
    })?;

    if amount < 0 {
        return Err(KioskError::invalid_amount(format!(
            "{} is negative",
            amount
        )));
    }

    Ok(amount)
}

/// Convert `amount` Rb to Tizo using `snapshot` for the tier step
pub fn convert(amount: i64, snapshot: &RateSnapshot) -> KioskResult<u64> {
    convert_detailed(amount, snapshot).map(|conversion| conversion.total)
}

/// Same as `convert`, keeping the per-step breakdown
pub fn convert_detailed(amount: i64, snapshot: &RateSnapshot) -> KioskResult<Conversion> {
    if amount < 0 {
        return Err(KioskError::invalid_amount(format!(
            "{} is negative",
            amount
        )));
    }
    let amount = amount as u64;

    let base_units = amount / BASE_UNIT;
    let base_credit = base_units
        .checked_mul(BASE_CREDIT)
        .ok_or_else(|| overflow(amount))?;
    let mut total = base_credit;
    let mut remaining = amount % BASE_UNIT;

    let mut tiers = Vec::new();
    if remaining > 0 {
        for tier in greedy_order(snapshot.entries()) {
            if remaining < tier.topup_unit {
                continue;
            }
            let count = remaining / tier.topup_unit;
            remaining -= count * tier.topup_unit;

            let credit = count
                .checked_mul(tier.credit_value)
                .ok_or_else(|| overflow(amount))?;
            total = total.checked_add(credit).ok_or_else(|| overflow(amount))?;

            tiers.push(TierApplication {
                topup_unit: tier.topup_unit,
                credit_value: tier.credit_value,
                count,
            });

            if remaining == 0 {
                break;
            }
        }
    }

    let residual = remaining;
    total = total.checked_add(residual).ok_or_else(|| overflow(amount))?;

    Ok(Conversion {
        amount,
        base_units,
        base_credit,
        tiers,
        residual,
        total,
    })
}

/// Tiers usable by the greedy pass, largest unit first
///
/// Units at or above `BASE_UNIT` are excluded. Rows sharing a unit are
/// ordered by higher credit first, then by their position in the snapshot.
fn greedy_order(entries: &[RateTableEntry]) -> Vec<&RateTableEntry> {
    let mut tiers: Vec<&RateTableEntry> = entries
        .iter()
        .filter(|e| e.topup_unit > 0 && e.topup_unit < BASE_UNIT)
        .collect();

    tiers.sort_by(|a, b| match b.topup_unit.cmp(&a.topup_unit) {
        Ordering::Equal => b.credit_value.cmp(&a.credit_value),
        other => other,
    });
    tiers
}

fn overflow(amount: u64) -> KioskError {
    KioskError::invalid_amount(format!("{} is too large to convert", amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rows: &[(u64, u64)]) -> RateSnapshot {
        RateSnapshot::from_rows(
            rows.iter()
                .map(|&(unit, credit)| RateTableEntry::new(unit, credit))
                .collect(),
        )
        .unwrap()
    }

    fn kiosk_tiers() -> RateSnapshot {
        snapshot(&[
            (40, 40),
            (100, 150),
            (200, 320),
            (300, 520),
            (550, 1020),
            (600, 1200),
            (1000, 2100),
        ])
    }

    #[test]
    fn test_zero_is_zero() {
        assert_eq!(convert(0, &kiosk_tiers()).unwrap(), 0);
        assert_eq!(convert(0, &RateSnapshot::empty()).unwrap(), 0);
    }

    #[test]
    fn test_negative_rejected() {
        let err = convert(-1, &kiosk_tiers()).unwrap_err();
        assert!(matches!(err, KioskError::InvalidAmount(_)));
    }

    #[test]
    fn test_base_unit_ignores_cache() {
        assert_eq!(convert(600, &kiosk_tiers()).unwrap(), 1200);
        assert_eq!(convert(600, &RateSnapshot::empty()).unwrap(), 1200);
        assert_eq!(convert(1200, &kiosk_tiers()).unwrap(), 2400);
    }

    #[test]
    fn test_documented_example_1790() {
        let conversion = convert_detailed(1790, &kiosk_tiers()).unwrap();

        assert_eq!(conversion.base_units, 2);
        assert_eq!(conversion.base_credit, 2400);
        assert_eq!(
            conversion.tiers,
            vec![
                TierApplication { topup_unit: 550, credit_value: 1020, count: 1 },
                TierApplication { topup_unit: 40, credit_value: 40, count: 1 },
            ]
        );
        assert_eq!(conversion.residual, 0);
        assert_eq!(conversion.total, 3460);
    }

    #[test]
    fn test_below_smallest_tier_is_one_to_one() {
        let tiers = snapshot(&[(100, 150), (200, 320)]);
        assert_eq!(convert(50, &tiers).unwrap(), 50);
    }

    #[test]
    fn test_empty_cache_falls_through_to_residual() {
        assert_eq!(convert(590, &RateSnapshot::empty()).unwrap(), 590);
        assert_eq!(convert(1790, &RateSnapshot::empty()).unwrap(), 2400 + 590);
    }

    #[test]
    fn test_tiers_at_or_above_base_unit_never_selected() {
        // Only the 600 and 1000 tiers exist; remainder must go 1:1
        let tiers = snapshot(&[(600, 5000), (1000, 9000)]);
        let conversion = convert_detailed(1599, &tiers).unwrap();
        assert_eq!(conversion.base_units, 2);
        assert!(conversion.tiers.is_empty());
        assert_eq!(conversion.total, 2400 + 399);
    }

    #[test]
    fn test_greedy_repeats_a_tier() {
        let tiers = snapshot(&[(100, 150)]);
        let conversion = convert_detailed(350, &tiers).unwrap();
        assert_eq!(conversion.tiers[0].count, 3);
        assert_eq!(conversion.residual, 50);
        assert_eq!(conversion.total, 450 + 50);
    }

    #[test]
    fn test_greedy_is_not_optimal_change() {
        // Taking 300 would give 520 + 299 = 819 Tizo; greedy takes 400 first
        let tiers = snapshot(&[(300, 520), (400, 600)]);
        let conversion = convert_detailed(599, &tiers).unwrap();
        assert_eq!(conversion.tiers.len(), 1);
        assert_eq!(conversion.tiers[0].topup_unit, 400);
        assert_eq!(conversion.total, 600 + 199);
    }

    #[test]
    fn test_duplicate_units_prefer_higher_credit() {
        let tiers = snapshot(&[(200, 300), (200, 330)]);
        let conversion = convert_detailed(200, &tiers).unwrap();
        assert_eq!(conversion.tiers[0].credit_value, 330);
        assert_eq!(conversion.total, 330);
    }

    #[test]
    fn test_never_awards_less_than_paid() {
        let tiers = kiosk_tiers();
        for amount in (0..3000).step_by(7) {
            let credit = convert(amount, &tiers).unwrap();
            assert!(credit >= amount as u64, "{} Rb -> {} Tizo", amount, credit);
        }
    }

    #[test]
    fn test_idempotent_for_same_snapshot() {
        let tiers = kiosk_tiers();
        for amount in [0, 39, 41, 599, 601, 1790, 12345] {
            assert_eq!(convert(amount, &tiers).unwrap(), convert(amount, &tiers).unwrap());
        }
    }

    #[test]
    fn test_huge_amount_does_not_wrap() {
        assert!(convert(i64::MAX, &kiosk_tiers()).is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1790 ").unwrap(), 1790);
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert!(matches!(parse_amount("-5"), Err(KioskError::InvalidAmount(_))));
        assert!(matches!(parse_amount("12.5"), Err(KioskError::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc"), Err(KioskError::InvalidAmount(_))));
        assert!(matches!(parse_amount(""), Err(KioskError::InvalidAmount(_))));
    }
}
