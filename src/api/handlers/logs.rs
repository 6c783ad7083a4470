//! Handler for the live log view.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::api::dto::logs::{LogEntry, LogsQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::timestamps::format_timestamp;

/// Response header carrying the newest returned timestamp.
pub const LATEST_TIMESTAMP_HEADER: HeaderName = HeaderName::from_static("x-latest-timestamp");

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Returns up to 100 log entries, newest first.
///
/// # Endpoint
///
/// `GET /api/logs?since=2025-03-01T12:00:00.000000Z`
///
/// # Query Parameters
///
/// - `since` (optional): Only entries strictly newer than this. Invalid
///   values are ignored.
///
/// # Response Headers
///
/// - `Cache-Control: no-cache, no-store, must-revalidate`
/// - `X-Latest-Timestamp`: timestamp of the first entry, omitted when empty.
///   Clients pass it back as `since` on the next poll.
///
/// # Errors
///
/// Returns 500 with `Failed to fetch logs` once retries are exhausted.
pub async fn logs_handler(
    State(state): State<AppState>,
    Query(params): Query<LogsQuery>,
) -> Result<Response, AppError> {
    let logs = state
        .log_service
        .recent_logs(params.since())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch logs");
            AppError::internal(
                "Failed to fetch logs",
                json!({
                    "reason": e.message(),
                    "timestamp": format_timestamp(Utc::now()),
                }),
            )
        })?;

    let entries: Vec<LogEntry> = logs.into_iter().map(LogEntry::from).collect();
    let latest = entries
        .first()
        .and_then(|entry| HeaderValue::from_str(&entry.timestamp).ok());

    let mut response = Json(entries).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    if let Some(latest) = latest {
        headers.insert(LATEST_TIMESTAMP_HEADER, latest);
    }

    Ok(response)
}
