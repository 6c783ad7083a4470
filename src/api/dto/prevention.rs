//! DTOs for the prevention mode switch.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::utils::truthy::is_truthy;

/// Response of `GET /api/waf/prevention`.
#[derive(Debug, Serialize)]
pub struct PreventionModeResponse {
    pub enabled: bool,
}

/// Response of `POST /api/waf/prevention`.
#[derive(Debug, Serialize)]
pub struct PreventionUpdateResponse {
    pub enabled: bool,
    pub status: &'static str,
    /// Whether the WAF engine acknowledged the change.
    pub forwarded: bool,
}

/// Extracts the requested flag from a `POST /api/waf/prevention` body.
///
/// The body must be a JSON object with an `enabled` key. Its value is
/// interpreted loosely (see [`is_truthy`]), so `1`, `"yes"` and `true`
/// all enable prevention mode.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `enabled` is missing.
pub fn parse_enabled(body: &Value) -> Result<bool, AppError> {
    body.as_object()
        .and_then(|obj| obj.get("enabled"))
        .map(is_truthy)
        .ok_or_else(|| {
            AppError::bad_request("Missing enabled parameter", json!({ "field": "enabled" }))
        })
}
