//! Handler for the dashboard status panel.

use axum::{Json, extract::State};

use crate::api::dto::status::StatusResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns request counters, prevention mode and the latest activity.
///
/// # Endpoint
///
/// `GET /api/status`
///
/// `latest_activity` holds the ten newest entries, newest first.
pub async fn status_handler(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let status = state.log_service.status().await?;
    Ok(Json(status.into()))
}
