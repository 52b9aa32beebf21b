//! Structured error handling for the TIZO kiosk service
//!
//! One error enum for the whole crate. Route handlers map it onto HTTP
//! status codes through `status_code()`; the rate cache only ever produces
//! `SourceUnavailable` towards its callers.

use thiserror::Error;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Error)]
pub enum KioskError {
    /// Amount is negative, fractional, or not a number at all
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rate source could not be reached, timed out, or returned malformed rows
    #[error("Rate source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Background task died before producing a result
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type KioskResult<T> = Result<T, KioskError>;

impl KioskError {
    /// Short machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            KioskError::InvalidAmount(_) => "invalid_amount",
            KioskError::SourceUnavailable(_) => "source_unavailable",
            KioskError::Database(_) => "database_error",
            KioskError::Config(_) => "config_error",
            KioskError::Internal(_) => "internal_error",
            KioskError::NotFound(_) => "not_found",
        }
    }

    /// HTTP status the webserver reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            KioskError::InvalidAmount(_) => 400,
            KioskError::NotFound(_) => 404,
            KioskError::SourceUnavailable(_) => 503,
            KioskError::Database(_) | KioskError::Config(_) | KioskError::Internal(_) => 500,
        }
    }

    /// Whether the caller (not the service) is at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub fn invalid_amount(message: impl Into<String>) -> Self {
        KioskError::InvalidAmount(message.into())
    }

    pub fn source_unavailable(message: impl Into<String>) -> Self {
        KioskError::SourceUnavailable(message.into())
    }
}
