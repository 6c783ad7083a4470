//! Handlers for the attack analytics charts.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use tracing::error;

use crate::api::dto::analytics::{
    AnomalousIpItem, AttackOriginItem, AttackOriginsQuery, TimelineItem,
};
use crate::application::services::analytics_service::clamp_origin_hours;
use crate::error::AppError;
use crate::state::AppState;

/// Returns hourly request and attack counts for the last 24 hours.
///
/// # Endpoint
///
/// `GET /api/attack-timeline`
///
/// Hours are labelled in the configured timeline timezone. Empty hours are
/// omitted. On failure the error is logged and an empty list is returned so
/// the chart keeps rendering.
pub async fn attack_timeline_handler(State(state): State<AppState>) -> Json<Vec<TimelineItem>> {
    match state.analytics_service.attack_timeline(Utc::now()).await {
        Ok(buckets) => Json(buckets.into_iter().map(TimelineItem::from).collect()),
        Err(e) => {
            error!(error = %e, "Failed to build attack timeline");
            Json(Vec::new())
        }
    }
}

/// Returns the 15 most suspicious source addresses.
///
/// # Endpoint
///
/// `GET /api/anomalous-ips`
///
/// On failure the error is logged and an empty list is returned.
pub async fn anomalous_ips_handler(State(state): State<AppState>) -> Json<Vec<AnomalousIpItem>> {
    match state.analytics_service.anomalous_ips().await {
        Ok(ips) => Json(ips.into_iter().map(AnomalousIpItem::from).collect()),
        Err(e) => {
            error!(error = %e, "Failed to rank anomalous IPs");
            Json(Vec::new())
        }
    }
}

/// Returns attacks aggregated per source country.
///
/// # Endpoint
///
/// `GET /api/attack-origins?hours=24`
///
/// # Query Parameters
///
/// - `hours` (optional): Look-back window, default 24, clamped to 1..=8760.
///   Unparsable values use the default.
///
/// Addresses missing from the GeoIP database are left out.
///
/// # Errors
///
/// Returns 500 Internal Server Error on database errors.
pub async fn attack_origins_handler(
    State(state): State<AppState>,
    Query(params): Query<AttackOriginsQuery>,
) -> Result<Json<Vec<AttackOriginItem>>, AppError> {
    let hours = clamp_origin_hours(params.hours);
    let origins = state
        .analytics_service
        .attack_origins(Utc::now(), hours)
        .await?;

    Ok(Json(origins.into_iter().map(AttackOriginItem::from).collect()))
}
