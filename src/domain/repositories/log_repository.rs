//! Repository trait for reading the WAF request log.

use crate::domain::entities::{
    ActivityPoint, AnomalousIp, IpAttackSummary, TimelineBucket, WafLog,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read-only access to the request log written by the WAF engine.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_log.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Counts every logged request.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Counts requests flagged as injection attempts.
    async fn count_attacks(&self) -> Result<i64, AppError>;

    /// Returns the `limit` newest entries, newest first.
    async fn latest_activity(&self, limit: i64) -> Result<Vec<ActivityPoint>, AppError>;

    /// Returns up to `limit` entries strictly newer than `since`, newest first.
    ///
    /// `since = None` returns the newest entries regardless of age.
    async fn recent_logs(
        &self,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<WafLog>, AppError>;

    /// Groups entries in `[from, to]` by hour of the given IANA timezone.
    ///
    /// Buckets are returned in ascending order; hours without traffic are absent.
    async fn hourly_timeline(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        timezone: &str,
    ) -> Result<Vec<TimelineBucket>, AppError>;

    /// Returns IPs with at least one flagged request, highest threat level first.
    async fn anomalous_ips(&self, limit: i64) -> Result<Vec<AnomalousIp>, AppError>;

    /// Groups flagged requests newer than `since` by source IP.
    async fn attacks_by_ip(&self, since: DateTime<Utc>) -> Result<Vec<IpAttackSummary>, AppError>;

    /// Verifies the backing store answers queries.
    async fn ping(&self) -> Result<(), AppError>;
}
