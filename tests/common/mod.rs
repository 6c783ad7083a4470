#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, ServiceExt};
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::normalize_path::NormalizePath;
use waf_dashboard::api::middleware::cors;
use waf_dashboard::domain::entities::{
    ActivityPoint, AnomalousIp, IpAttackSummary, PreventionSetting, TimelineBucket, WafLog,
};
use waf_dashboard::domain::repositories::{LogRepository, SettingsRepository};
use waf_dashboard::error::AppError;
use waf_dashboard::infrastructure::geoip::{GeoError, GeoLocation, GeoLocator};
use waf_dashboard::infrastructure::waf::{WafControl, WafError, WafResult};
use waf_dashboard::routes::app_router;
use waf_dashboard::state::AppState;

/// Dashboard origin allowed by the test router.
pub const DASHBOARD_ORIGIN: &str = "http://localhost:3000";

fn storage_down() -> AppError {
    AppError::internal("Database error", json!({}))
}

/// Log store backed by a vector. Timeline hours are labelled in UTC.
#[derive(Default)]
pub struct InMemoryLogRepository {
    logs: Mutex<Vec<WafLog>>,
    failing: AtomicBool,
}

impl InMemoryLogRepository {
    pub fn with_logs(logs: Vec<WafLog>) -> Self {
        Self {
            logs: Mutex::new(logs),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with an internal error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Result<Vec<WafLog>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        let mut logs = self.logs.lock().unwrap().clone();
        logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));
        Ok(logs)
    }
}

#[async_trait]
impl LogRepository for InMemoryLogRepository {
    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.snapshot()?.len() as i64)
    }

    async fn count_attacks(&self) -> Result<i64, AppError> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|l| l.injection_detected)
            .count() as i64)
    }

    async fn latest_activity(&self, limit: i64) -> Result<Vec<ActivityPoint>, AppError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .take(limit as usize)
            .map(|l| ActivityPoint {
                logged_at: l.logged_at,
                injection_detected: l.injection_detected,
            })
            .collect())
    }

    async fn recent_logs(
        &self,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<WafLog>, AppError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|l| since.is_none_or(|since| l.logged_at > since))
            .take(limit as usize)
            .collect())
    }

    async fn hourly_timeline(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        _timezone: &str,
    ) -> Result<Vec<TimelineBucket>, AppError> {
        let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        for log in self.snapshot()? {
            if log.logged_at < from || log.logged_at > to {
                continue;
            }
            let entry = buckets
                .entry(log.logged_at.format("%Y-%m-%d %H:00").to_string())
                .or_default();
            entry.0 += 1;
            if log.injection_detected {
                entry.1 += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(bucket, (total_requests, attacks))| TimelineBucket {
                bucket,
                total_requests,
                attacks,
            })
            .collect())
    }

    async fn anomalous_ips(&self, limit: i64) -> Result<Vec<AnomalousIp>, AppError> {
        let mut per_ip: BTreeMap<String, (i64, i64, DateTime<Utc>, BTreeSet<String>)> =
            BTreeMap::new();
        for log in self.snapshot()? {
            let entry = per_ip
                .entry(log.ip.clone())
                .or_insert((0, 0, log.logged_at, BTreeSet::new()));
            entry.0 += 1;
            entry.2 = entry.2.max(log.logged_at);
            if log.injection_detected {
                entry.1 += 1;
                entry.3.extend(log.matched_rules);
            }
        }

        let mut ranked: Vec<AnomalousIp> = per_ip
            .into_iter()
            .filter(|(_, (_, anomalous, _, _))| *anomalous > 0)
            .map(|(ip, (total, anomalous, last, rules))| AnomalousIp {
                ip,
                total_requests: total,
                anomalous_requests: anomalous,
                last_detected: last,
                threat_level: anomalous as f64 / total as f64 * 100.0,
                matched_rules: rules.into_iter().collect(),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.threat_level
                .total_cmp(&a.threat_level)
                .then(b.anomalous_requests.cmp(&a.anomalous_requests))
                .then(a.ip.cmp(&b.ip))
        });
        ranked.truncate(limit as usize);

        Ok(ranked)
    }

    async fn attacks_by_ip(&self, since: DateTime<Utc>) -> Result<Vec<IpAttackSummary>, AppError> {
        let mut per_ip: BTreeMap<String, IpAttackSummary> = BTreeMap::new();
        for log in self.snapshot()? {
            if !log.injection_detected || log.logged_at < since {
                continue;
            }
            let summary = per_ip
                .entry(log.ip.clone())
                .or_insert_with(|| IpAttackSummary {
                    ip: log.ip.clone(),
                    attack_count: 0,
                    last_attack: log.logged_at,
                    rule_counts: BTreeMap::new(),
                });
            summary.attack_count += 1;
            summary.last_attack = summary.last_attack.max(log.logged_at);
            for rule in log.matched_rules {
                *summary.rule_counts.entry(rule).or_default() += 1;
            }
        }

        Ok(per_ip.into_values().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.snapshot().map(|_| ())
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    setting: Mutex<Option<PreventionSetting>>,
    failing: AtomicBool,
}

impl InMemorySettingsRepository {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<PreventionSetting> {
        self.setting.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_prevention_mode(&self) -> Result<Option<PreventionSetting>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        Ok(self.stored())
    }

    async fn set_prevention_mode(&self, enabled: bool) -> Result<PreventionSetting, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        let setting = PreventionSetting::new(enabled, Utc::now());
        *self.setting.lock().unwrap() = Some(setting.clone());
        Ok(setting)
    }
}

/// Locator answering from a fixed table.
pub struct StaticLocator {
    entries: HashMap<IpAddr, GeoLocation>,
    available: bool,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    pub fn with(mut self, ip: &str, country: &str, lat: f64, lon: f64) -> Self {
        self.entries.insert(
            ip.parse().unwrap(),
            GeoLocation {
                country: Some(country.to_string()),
                latitude: Some(lat),
                longitude: Some(lon),
                ..Default::default()
            },
        );
        self
    }
}

impl GeoLocator for StaticLocator {
    fn lookup(&self, ip: IpAddr) -> Result<Option<GeoLocation>, GeoError> {
        if !self.available {
            return Err(GeoError::Unavailable);
        }
        Ok(self.entries.get(&ip).cloned())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// WAF client recording every forwarded flag.
#[derive(Default)]
pub struct RecordingWafClient {
    pub calls: Mutex<Vec<bool>>,
    unconfigured: bool,
    failing: bool,
}

impl RecordingWafClient {
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WafControl for RecordingWafClient {
    async fn set_prevention_mode(&self, enabled: bool) -> WafResult<()> {
        self.calls.lock().unwrap().push(enabled);
        if self.failing {
            return Err(WafError::Status(502));
        }
        Ok(())
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}

/// Backends of a test application, kept for assertions.
pub struct TestApp {
    pub logs: Arc<InMemoryLogRepository>,
    pub settings: Arc<InMemorySettingsRepository>,
    pub waf: Arc<RecordingWafClient>,
    pub server: TestServer,
}

pub fn create_test_state(
    logs: Arc<InMemoryLogRepository>,
    settings: Arc<InMemorySettingsRepository>,
    geo: Arc<StaticLocator>,
    waf: Arc<RecordingWafClient>,
) -> AppState {
    AppState::new(logs, settings, geo, waf, "UTC")
}

/// Builds the production router, middleware included.
pub fn create_app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    let app = app_router(state, cors::layer(&[DASHBOARD_ORIGIN.to_string()]));
    ServiceExt::<Request>::into_make_service(app)
}

pub fn spawn_app(logs: Vec<WafLog>, geo: StaticLocator, waf: RecordingWafClient) -> TestApp {
    let logs = Arc::new(InMemoryLogRepository::with_logs(logs));
    let settings = Arc::new(InMemorySettingsRepository::default());
    let waf = Arc::new(waf);

    let state = create_test_state(logs.clone(), settings.clone(), Arc::new(geo), waf.clone());
    let server = TestServer::new(create_app(state)).unwrap();

    TestApp {
        logs,
        settings,
        waf,
        server,
    }
}

pub fn default_app(logs: Vec<WafLog>) -> TestApp {
    spawn_app(logs, StaticLocator::new(), RecordingWafClient::default())
}

/// Inserts a log row the way the WAF engine writes it. Returns the new id.
pub async fn insert_log(pool: &PgPool, log: &WafLog) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO waf_logs \
            (logged_at, ip, method, path, query, user_agent, injection_detected, matched_rules) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(log.logged_at)
    .bind(&log.ip)
    .bind(&log.method)
    .bind(&log.path)
    .bind(&log.query)
    .bind(&log.user_agent)
    .bind(log.injection_detected)
    .bind(&log.matched_rules)
    .fetch_one(pool)
    .await
    .unwrap()
}
