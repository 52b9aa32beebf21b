//! Offers database
//!
//! SQLite store holding the kiosk's top-up offers. The rate cache reads it
//! through the `RateSource` trait; the API reads it directly for offer
//! lookups.

pub mod models;
pub mod offers;

pub use models::{NewOffer, Offer, DEFAULT_OFFERS};
pub use offers::OffersDb;
