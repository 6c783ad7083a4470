//! Request log browsing and dashboard status.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::warn;

use crate::domain::entities::{ActivityPoint, WafLog};
use crate::domain::repositories::{LogRepository, SettingsRepository};
use crate::error::AppError;

/// Maximum number of entries returned by one log poll.
pub const LOG_PAGE_LIMIT: i64 = 100;

/// Number of entries in the status activity feed.
pub const LATEST_ACTIVITY_LIMIT: i64 = 10;

/// Total attempts for a log poll, including the first one.
const FETCH_ATTEMPTS: usize = 3;

/// Delay before the first retry; doubles for each further retry.
const FETCH_BASE_DELAY_MS: u64 = 500;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStatus {
    pub total_requests: i64,
    pub attacks_detected: i64,
    pub prevention_mode: bool,
    pub latest_activity: Vec<ActivityPoint>,
}

/// Service backing the live log view and the status panel.
pub struct LogService<L: LogRepository + ?Sized, S: SettingsRepository + ?Sized> {
    logs: Arc<L>,
    settings: Arc<S>,
}

impl<L: LogRepository + ?Sized, S: SettingsRepository + ?Sized> LogService<L, S> {
    /// Creates a new log service.
    pub fn new(logs: Arc<L>, settings: Arc<S>) -> Self {
        Self { logs, settings }
    }

    /// Returns up to [`LOG_PAGE_LIMIT`] entries newer than `since`, newest first.
    ///
    /// Dashboards poll this endpoint continuously, so transient database
    /// failures are retried with exponential backoff (500 ms, then 1 s)
    /// before giving up.
    ///
    /// # Errors
    ///
    /// Returns the last [`AppError`] once all attempts failed.
    pub async fn recent_logs(&self, since: Option<DateTime<Utc>>) -> Result<Vec<WafLog>, AppError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(FETCH_BASE_DELAY_MS / 2)
            .max_delay(Duration::from_secs(5))
            .take(FETCH_ATTEMPTS - 1);

        let logs = &self.logs;
        RetryIf::spawn(
            strategy,
            move || async move {
                let result = logs.recent_logs(since, LOG_PAGE_LIMIT).await;
                if let Err(e) = &result {
                    warn!(error = %e, "Fetching logs failed");
                }
                result
            },
            |e: &AppError| e.is_transient(),
        )
        .await
    }

    /// Collects the dashboard status panel.
    ///
    /// The independent queries run concurrently. Prevention mode defaults to
    /// `false` when it was never stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn status(&self) -> Result<DashboardStatus, AppError> {
        let (total_requests, attacks_detected, prevention, latest_activity) = tokio::try_join!(
            self.logs.count_all(),
            self.logs.count_attacks(),
            self.settings.get_prevention_mode(),
            self.logs.latest_activity(LATEST_ACTIVITY_LIMIT),
        )?;

        Ok(DashboardStatus {
            total_requests,
            attacks_detected,
            prevention_mode: prevention.is_some_and(|p| p.enabled),
            latest_activity,
        })
    }

    /// Verifies the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the database is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.logs.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PreventionSetting;
    use crate::domain::repositories::{MockLogRepository, MockSettingsRepository};
    use mockall::Sequence;
    use serde_json::json;

    fn service(
        logs: MockLogRepository,
        settings: MockSettingsRepository,
    ) -> LogService<MockLogRepository, MockSettingsRepository> {
        LogService::new(Arc::new(logs), Arc::new(settings))
    }

    #[tokio::test]
    async fn test_recent_logs_passes_since_and_limit() {
        let since = Utc::now();
        let mut logs = MockLogRepository::new();
        logs.expect_recent_logs()
            .withf(move |s, limit| *s == Some(since) && *limit == LOG_PAGE_LIMIT)
            .times(1)
            .returning(|_, _| {
                Ok(vec![WafLog::clean(1, Utc::now(), "10.0.0.1", "GET", "/")])
            });

        let result = service(logs, MockSettingsRepository::new())
            .recent_logs(Some(since))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ip, "10.0.0.1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recent_logs_retries_transient_errors() {
        let mut seq = Sequence::new();
        let mut logs = MockLogRepository::new();
        logs.expect_recent_logs()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(AppError::unavailable("Database unavailable", json!({}))));
        logs.expect_recent_logs()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec![]));

        let result = service(logs, MockSettingsRepository::new())
            .recent_logs(None)
            .await;

        assert!(result.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recent_logs_gives_up_after_three_attempts() {
        let mut logs = MockLogRepository::new();
        logs.expect_recent_logs()
            .times(3)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let result = service(logs, MockSettingsRepository::new())
            .recent_logs(None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_recent_logs_does_not_retry_validation_errors() {
        let mut logs = MockLogRepository::new();
        logs.expect_recent_logs()
            .times(1)
            .returning(|_, _| Err(AppError::bad_request("bad", json!({}))));

        let result = service(logs, MockSettingsRepository::new())
            .recent_logs(None)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_status_combines_counts_and_setting() {
        let now = Utc::now();
        let mut logs = MockLogRepository::new();
        logs.expect_count_all().times(1).returning(|| Ok(120));
        logs.expect_count_attacks().times(1).returning(|| Ok(7));
        logs.expect_latest_activity()
            .withf(|limit| *limit == LATEST_ACTIVITY_LIMIT)
            .times(1)
            .returning(move |_| {
                Ok(vec![ActivityPoint {
                    logged_at: now,
                    injection_detected: true,
                }])
            });

        let mut settings = MockSettingsRepository::new();
        settings
            .expect_get_prevention_mode()
            .times(1)
            .returning(move || Ok(Some(PreventionSetting::new(true, now))));

        let status = service(logs, settings).status().await.unwrap();

        assert_eq!(status.total_requests, 120);
        assert_eq!(status.attacks_detected, 7);
        assert!(status.prevention_mode);
        assert_eq!(status.latest_activity.len(), 1);
        assert!(status.latest_activity[0].injection_detected);
    }

    #[tokio::test]
    async fn test_status_defaults_prevention_mode_to_false() {
        let mut logs = MockLogRepository::new();
        logs.expect_count_all().returning(|| Ok(0));
        logs.expect_count_attacks().returning(|| Ok(0));
        logs.expect_latest_activity().returning(|_| Ok(vec![]));

        let mut settings = MockSettingsRepository::new();
        settings.expect_get_prevention_mode().returning(|| Ok(None));

        let status = service(logs, settings).status().await.unwrap();

        assert!(!status.prevention_mode);
        assert!(status.latest_activity.is_empty());
    }

    #[tokio::test]
    async fn test_status_propagates_errors() {
        let mut logs = MockLogRepository::new();
        logs.expect_count_all()
            .returning(|| Err(AppError::internal("Database error", json!({}))));
        logs.expect_count_attacks().returning(|| Ok(0));
        logs.expect_latest_activity().returning(|_| Ok(vec![]));

        let mut settings = MockSettingsRepository::new();
        settings.expect_get_prevention_mode().returning(|| Ok(None));

        let result = service(logs, settings).status().await;

        assert!(result.is_err());
    }
}
