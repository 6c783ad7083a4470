//! Handlers for the prevention mode switch.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};

use crate::api::dto::prevention::{
    PreventionModeResponse, PreventionUpdateResponse, parse_enabled,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current prevention mode.
///
/// # Endpoint
///
/// `GET /api/waf/prevention`
///
/// Defaults to `false` when the flag was never set.
pub async fn get_prevention_handler(
    State(state): State<AppState>,
) -> Result<Json<PreventionModeResponse>, AppError> {
    let enabled = state.prevention_service.is_enabled().await?;
    Ok(Json(PreventionModeResponse { enabled }))
}

/// Turns prevention mode on or off.
///
/// # Endpoint
///
/// `POST /api/waf/prevention`
///
/// # Request Body
///
/// ```json
/// { "enabled": true }
/// ```
///
/// The flag is stored first, then forwarded to the WAF engine when
/// `WAF_API_URL` is configured. `forwarded` in the response tells whether
/// the engine acknowledged it.
///
/// # Errors
///
/// - 400 Bad Request if the body is not a JSON object with `enabled`
/// - 500 Internal Server Error if the flag cannot be stored
pub async fn set_prevention_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PreventionUpdateResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| {
        AppError::bad_request(
            "Missing enabled parameter",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let enabled = parse_enabled(&body)?;
    let update = state.prevention_service.set_enabled(enabled).await?;

    Ok(Json(PreventionUpdateResponse {
        enabled: update.setting.enabled,
        status: "success",
        forwarded: update.forwarded,
    }))
}
