//! Response helpers shared by all route modules
//!
//! Every JSON body carries `success`; successful payloads sit under `data`,
//! failures under `error` with a machine-readable `code`.

use crate::errors::KioskError;
use crate::logger::{self, LogTag};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn success_response<T: Serialize>(data: T) -> Response {
    Json(serde_json::json!({
        "success": true,
        "data": data,
    }))
    .into_response()
}

pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<serde_json::Value>,
) -> Response {
    let mut error = serde_json::json!({
        "code": code,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = details;
    }

    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": error,
        })),
    )
        .into_response()
}

/// Map a crate error onto its HTTP status and error body
pub fn kiosk_error_response(err: &KioskError) -> Response {
    if !err.is_client_error() {
        logger::warning(LogTag::Webserver, &format!("Request failed: {}", err));
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, err.code(), &err.to_string(), None)
}
