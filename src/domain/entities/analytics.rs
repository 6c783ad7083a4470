//! Aggregated views over the WAF log.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Request counts for one hour of the attack timeline.
///
/// `bucket` is formatted as `YYYY-MM-DD HH:00` in the timeline timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBucket {
    pub bucket: String,
    pub total_requests: i64,
    pub attacks: i64,
}

/// An IP address with at least one flagged request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalousIp {
    pub ip: String,
    pub total_requests: i64,
    pub anomalous_requests: i64,
    pub last_detected: DateTime<Utc>,
    /// Share of flagged requests, in percent.
    pub threat_level: f64,
    /// Deduplicated, sorted union of rules matched by the flagged requests.
    pub matched_rules: Vec<String>,
}

/// Attacks originating from one IP within a time window.
#[derive(Debug, Clone, PartialEq)]
pub struct IpAttackSummary {
    pub ip: String,
    pub attack_count: i64,
    pub last_attack: DateTime<Utc>,
    /// Number of attack requests that matched each rule.
    pub rule_counts: BTreeMap<String, i64>,
}

/// Number of hits for a single rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCount {
    pub rule: String,
    pub count: i64,
}

/// Attacks folded per country of origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryAttackStats {
    pub country: String,
    pub attack_count: i64,
    pub unique_ips: usize,
    pub last_attack: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub top_attack_types: Vec<RuleCount>,
}
