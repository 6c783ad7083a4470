//! WAF log entity representing one inspected request.

use chrono::{DateTime, Utc};

/// A request inspected by the WAF engine.
///
/// Rows are written by the WAF itself; this service only reads them.
/// `matched_rules` is empty unless `injection_detected` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct WafLog {
    pub id: i64,
    pub logged_at: DateTime<Utc>,
    pub ip: String,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub injection_detected: bool,
    pub matched_rules: Vec<String>,
}

impl WafLog {
    /// Creates a log entry for a request that passed inspection.
    pub fn clean(
        id: i64,
        logged_at: DateTime<Utc>,
        ip: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id,
            logged_at,
            ip: ip.into(),
            method: method.into(),
            path: path.into(),
            query: None,
            user_agent: None,
            injection_detected: false,
            matched_rules: Vec::new(),
        }
    }

    /// Marks the entry as an attack matched by `rules`.
    pub fn with_detection<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.injection_detected = true;
        self.matched_rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Minimal projection of a log entry used by the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPoint {
    pub logged_at: DateTime<Utc>,
    pub injection_detected: bool,
}
