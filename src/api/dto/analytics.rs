//! DTOs for the attack analytics endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::entities::{AnomalousIp, CountryAttackStats, RuleCount, TimelineBucket};
use crate::utils::timestamps::format_timestamp;

/// One hour of the attack timeline.
#[derive(Debug, Serialize)]
pub struct TimelineItem {
    /// Hour label, `YYYY-MM-DD HH:00`.
    pub timestamp: String,
    pub total_requests: i64,
    pub attacks: i64,
}

impl From<TimelineBucket> for TimelineItem {
    fn from(b: TimelineBucket) -> Self {
        Self {
            timestamp: b.bucket,
            total_requests: b.total_requests,
            attacks: b.attacks,
        }
    }
}

/// One row of the anomalous IP ranking.
#[derive(Debug, Serialize)]
pub struct AnomalousIpItem {
    pub ip: String,
    pub total_requests: i64,
    pub anomalous_requests: i64,
    pub last_detected: String,
    pub threat_level: f64,
    pub matched_rules: Vec<String>,
}

impl From<AnomalousIp> for AnomalousIpItem {
    fn from(a: AnomalousIp) -> Self {
        Self {
            ip: a.ip,
            total_requests: a.total_requests,
            anomalous_requests: a.anomalous_requests,
            last_detected: format_timestamp(a.last_detected),
            threat_level: a.threat_level,
            matched_rules: a.matched_rules,
        }
    }
}

/// Query parameters of `GET /api/attack-origins`.
///
/// An unparsable `hours` value falls back to the default window.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct AttackOriginsQuery {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub hours: Option<i64>,
}

/// Rule hit count within a country.
#[derive(Debug, Serialize)]
pub struct AttackTypeItem {
    pub rule: String,
    pub count: i64,
}

impl From<RuleCount> for AttackTypeItem {
    fn from(r: RuleCount) -> Self {
        Self {
            rule: r.rule,
            count: r.count,
        }
    }
}

/// One country on the attack origin map.
#[derive(Debug, Serialize)]
pub struct AttackOriginItem {
    pub country: String,
    pub attack_count: i64,
    pub unique_ips: usize,
    pub last_attack: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub top_attack_types: Vec<AttackTypeItem>,
}

impl From<CountryAttackStats> for AttackOriginItem {
    fn from(c: CountryAttackStats) -> Self {
        Self {
            country: c.country,
            attack_count: c.attack_count,
            unique_ips: c.unique_ips,
            last_attack: c.last_attack.map(format_timestamp),
            latitude: c.latitude,
            longitude: c.longitude,
            top_attack_types: c
                .top_attack_types
                .into_iter()
                .map(AttackTypeItem::from)
                .collect(),
        }
    }
}
