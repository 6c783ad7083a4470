//! DTOs for the dashboard status panel.

use serde::Serialize;

use crate::application::services::DashboardStatus;
use crate::domain::entities::ActivityPoint;
use crate::utils::timestamps::format_timestamp;

/// Verdict projection used by the activity feed.
#[derive(Debug, Serialize)]
pub struct ActivityVerdict {
    pub injection_detected: bool,
}

/// One point of the latest activity feed.
#[derive(Debug, Serialize)]
pub struct ActivityItem {
    pub timestamp: String,
    pub analysis_result: ActivityVerdict,
}

impl From<ActivityPoint> for ActivityItem {
    fn from(point: ActivityPoint) -> Self {
        Self {
            timestamp: format_timestamp(point.logged_at),
            analysis_result: ActivityVerdict {
                injection_detected: point.injection_detected,
            },
        }
    }
}

/// Response of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total_requests: i64,
    pub attacks_detected: i64,
    pub prevention_mode: bool,
    pub latest_activity: Vec<ActivityItem>,
}

impl From<DashboardStatus> for StatusResponse {
    fn from(status: DashboardStatus) -> Self {
        Self {
            total_requests: status.total_requests,
            attacks_detected: status.attacks_detected,
            prevention_mode: status.prevention_mode,
            latest_activity: status
                .latest_activity
                .into_iter()
                .map(ActivityItem::from)
                .collect(),
        }
    }
}
