//! Custom top-up quotes with upsell suggestions
//!
//! A quote converts the requested amount and proposes a few larger amounts,
//! each converted with the same snapshot so the kiosk can show what the
//! customer would get by topping up a bit more.

use super::converter::{convert, convert_detailed, Conversion, BASE_UNIT};
use super::types::RateSnapshot;
use crate::errors::KioskResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsellSuggestion {
    pub amount: u64,
    pub tizo: u64,
    /// Extra Tizo over the requested amount's quote
    pub extra_tizo: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomQuote {
    pub amount: u64,
    pub tizo: u64,
    pub breakdown: Conversion,
    pub upsells: Vec<UpsellSuggestion>,
}

/// Largest amount the converter accepts
const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Quote `amount` and attach up to `upsell_count` larger suggestions
///
/// Suggestions that cannot be converted are left out; they never fail the
/// quote itself.
pub fn quote_custom(
    amount: i64,
    snapshot: &RateSnapshot,
    upsell_count: usize,
) -> KioskResult<CustomQuote> {
    let breakdown = convert_detailed(amount, snapshot)?;
    let tizo = breakdown.total;

    let upsells = upsell_amounts(breakdown.amount, snapshot, upsell_count)
        .into_iter()
        .filter_map(|upsell_amount| {
            let signed = i64::try_from(upsell_amount).ok()?;
            let upsell_tizo = convert(signed, snapshot).ok()?;
            Some(UpsellSuggestion {
                amount: upsell_amount,
                tizo: upsell_tizo,
                extra_tizo: upsell_tizo.saturating_sub(tizo),
            })
        })
        .collect();

    Ok(CustomQuote {
        amount: breakdown.amount,
        tizo,
        breakdown,
        upsells,
    })
}

/// Suggested amounts strictly above `amount`, ascending and distinct
///
/// Cached tier units come first; if there are not enough of them the list
/// continues with the next multiples of `BASE_UNIT`. Nothing above
/// `i64::MAX` is suggested, so the list may come back short.
pub fn upsell_amounts(amount: u64, snapshot: &RateSnapshot, count: usize) -> Vec<u64> {
    let mut amounts = snapshot.units_above(amount, count);
    amounts.retain(|&unit| unit <= MAX_AMOUNT);

    while amounts.len() < count {
        let floor = amounts.last().copied().unwrap_or(amount);
        match (floor / BASE_UNIT + 1).checked_mul(BASE_UNIT) {
            Some(next) if next <= MAX_AMOUNT => amounts.push(next),
            _ => break,
        }
    }

    amounts
}
