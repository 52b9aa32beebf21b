//! Rate table cache and the tiered Rb -> Tizo converter
//!
//! The cache is owned by the composition root and passed to whoever needs
//! it; the converter only ever sees a `RateSnapshot`.

pub mod cache;
pub mod converter;
pub mod quote;
pub mod refresh;
pub mod source;
pub mod types;

pub use cache::{RateCache, RateCacheMetrics};
pub use converter::{
    convert, convert_detailed, parse_amount, Conversion, TierApplication, BASE_CREDIT, BASE_UNIT,
};
pub use quote::{quote_custom, upsell_amounts, CustomQuote, UpsellSuggestion};
pub use refresh::start_refresh_task;
pub use source::RateSource;
pub use types::{RateSnapshot, RateTableEntry};
