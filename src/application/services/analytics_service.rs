//! Attack analytics: timeline, suspicious sources and origin map.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{
    AnomalousIp, CountryAttackStats, IpAttackSummary, RuleCount, TimelineBucket,
};
use crate::domain::repositories::LogRepository;
use crate::error::AppError;
use crate::infrastructure::geoip::GeoLocator;

/// Length of the attack timeline window.
pub const TIMELINE_WINDOW_HOURS: i64 = 24;

/// Number of entries in the anomalous IP ranking.
pub const ANOMALOUS_IP_LIMIT: i64 = 15;

/// Number of rules listed per country on the origin map.
pub const TOP_ATTACK_TYPES: usize = 5;

/// Default origin map window.
pub const DEFAULT_ORIGIN_HOURS: i64 = 24;

/// Largest accepted origin map window (one year).
pub const MAX_ORIGIN_HOURS: i64 = 24 * 365;

#[derive(Default)]
struct CountryAccumulator {
    attack_count: i64,
    unique_ips: usize,
    last_attack: Option<DateTime<Utc>>,
    coordinates: Option<(f64, f64)>,
    rules: HashMap<String, i64>,
}

impl CountryAccumulator {
    fn absorb(&mut self, summary: &IpAttackSummary, coordinates: Option<(f64, f64)>) {
        self.attack_count += summary.attack_count;
        self.unique_ips += 1;
        self.last_attack = self.last_attack.max(Some(summary.last_attack));
        if self.coordinates.is_none() {
            self.coordinates = coordinates;
        }
        for (rule, count) in &summary.rule_counts {
            *self.rules.entry(rule.clone()).or_default() += count;
        }
    }

    fn finish(self, country: String) -> CountryAttackStats {
        let mut top: Vec<RuleCount> = self
            .rules
            .into_iter()
            .map(|(rule, count)| RuleCount { rule, count })
            .collect();
        top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.rule.cmp(&b.rule)));
        top.truncate(TOP_ATTACK_TYPES);

        CountryAttackStats {
            country,
            attack_count: self.attack_count,
            unique_ips: self.unique_ips,
            last_attack: self.last_attack,
            latitude: self.coordinates.map(|(lat, _)| lat),
            longitude: self.coordinates.map(|(_, lon)| lon),
            top_attack_types: top,
        }
    }
}

/// Service computing the aggregated attack views of the dashboard.
pub struct AnalyticsService<L: LogRepository + ?Sized, G: GeoLocator + ?Sized> {
    logs: Arc<L>,
    geo: Arc<G>,
    timezone: String,
}

impl<L: LogRepository + ?Sized, G: GeoLocator + ?Sized> AnalyticsService<L, G> {
    /// Creates a new analytics service.
    ///
    /// `timezone` is the IANA zone used to label timeline hours.
    pub fn new(logs: Arc<L>, geo: Arc<G>, timezone: impl Into<String>) -> Self {
        Self {
            logs,
            geo,
            timezone: timezone.into(),
        }
    }

    /// Hourly request and attack counts for the 24 hours ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn attack_timeline(&self, now: DateTime<Utc>) -> Result<Vec<TimelineBucket>, AppError> {
        let from = now - Duration::hours(TIMELINE_WINDOW_HOURS);
        self.logs.hourly_timeline(from, now, &self.timezone).await
    }

    /// Sources with flagged traffic, ranked by threat level.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn anomalous_ips(&self) -> Result<Vec<AnomalousIp>, AppError> {
        self.logs.anomalous_ips(ANOMALOUS_IP_LIMIT).await
    }

    /// Attacks of the last `hours` hours folded per country of origin.
    ///
    /// # Folding Rules
    ///
    /// - IPs that cannot be parsed or located are skipped
    /// - Records without a country name are grouped under `"Unknown"`
    /// - Coordinates come from the first located IP of each country
    /// - Countries are ordered by attack count, most active first
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn attack_origins(
        &self,
        now: DateTime<Utc>,
        hours: i64,
    ) -> Result<Vec<CountryAttackStats>, AppError> {
        let since = now - Duration::hours(hours);
        let summaries = self.logs.attacks_by_ip(since).await?;

        let mut countries: HashMap<String, CountryAccumulator> = HashMap::new();

        for summary in &summaries {
            let ip: IpAddr = match summary.ip.parse() {
                Ok(ip) => ip,
                Err(_) => {
                    warn!(ip = %summary.ip, "Skipping unparsable IP address");
                    continue;
                }
            };

            let location = match self.geo.lookup(ip) {
                Ok(Some(location)) => location,
                Ok(None) => {
                    debug!(%ip, "IP address not found in GeoIP database");
                    continue;
                }
                Err(e) => {
                    warn!(%ip, error = %e, "GeoIP lookup failed");
                    continue;
                }
            };

            countries
                .entry(location.country_label().to_string())
                .or_default()
                .absorb(summary, location.coordinates());
        }

        let mut result: Vec<CountryAttackStats> = countries
            .into_iter()
            .map(|(country, acc)| acc.finish(country))
            .collect();
        result.sort_by(|a, b| {
            b.attack_count
                .cmp(&a.attack_count)
                .then_with(|| a.country.cmp(&b.country))
        });

        Ok(result)
    }

    /// Reports whether a GeoIP database is loaded.
    pub fn geoip_available(&self) -> bool {
        self.geo.is_available()
    }
}

/// Clamps a requested origin window to `1..=MAX_ORIGIN_HOURS`.
pub fn clamp_origin_hours(hours: Option<i64>) -> i64 {
    hours
        .unwrap_or(DEFAULT_ORIGIN_HOURS)
        .clamp(1, MAX_ORIGIN_HOURS)
}
