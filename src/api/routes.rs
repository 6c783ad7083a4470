//! API route configuration.
//!
//! The dashboard API is unauthenticated; it is meant to sit behind the same
//! network boundary as the WAF itself.

use crate::api::handlers::{
    anomalous_ips_handler, attack_origins_handler, attack_timeline_handler,
    get_prevention_handler, logs_handler, set_prevention_handler, status_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All dashboard API routes.
///
/// # Endpoints
///
/// - `GET  /waf/prevention`   - Current prevention mode
/// - `POST /waf/prevention`   - Switch prevention mode on or off
/// - `GET  /status`           - Counters and latest activity
/// - `GET  /logs`             - Live log view (polling with `since`)
/// - `GET  /attack-timeline`  - Hourly attack counts, last 24 hours
/// - `GET  /anomalous-ips`    - Most suspicious source addresses
/// - `GET  /attack-origins`   - Attacks per source country
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/waf/prevention",
            get(get_prevention_handler).post(set_prevention_handler),
        )
        .route("/status", get(status_handler))
        .route("/logs", get(logs_handler))
        .route("/attack-timeline", get(attack_timeline_handler))
        .route("/anomalous-ips", get(anomalous_ips_handler))
        .route("/attack-origins", get(attack_origins_handler))
}
