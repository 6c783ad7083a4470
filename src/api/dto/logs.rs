//! DTOs for the live log view.

use serde::{Deserialize, Serialize};

use crate::domain::entities::WafLog;
use crate::utils::timestamps::{format_timestamp, parse_timestamp};

/// Query parameters of `GET /api/logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Only entries strictly newer than this timestamp are returned.
    pub since: Option<String>,
}

impl LogsQuery {
    /// Parsed `since` filter. Unparsable values are ignored.
    pub fn since(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let raw = self.since.as_deref()?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            tracing::debug!(since = raw, "Ignoring invalid timestamp filter");
        }
        parsed
    }
}

/// WAF verdict attached to a log entry.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub injection_detected: bool,
    pub matched_rules: Vec<String>,
}

/// One entry of the live log view.
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub ip: String,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub analysis_result: AnalysisResult,
}

impl From<WafLog> for LogEntry {
    fn from(log: WafLog) -> Self {
        Self {
            timestamp: format_timestamp(log.logged_at),
            ip: log.ip,
            method: log.method,
            path: log.path,
            query: log.query,
            user_agent: log.user_agent,
            analysis_result: AnalysisResult {
                injection_detected: log.injection_detected,
                matched_rules: log.matched_rules,
            },
        }
    }
}
