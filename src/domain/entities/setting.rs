//! Persisted WAF settings.

use chrono::{DateTime, Utc};

/// Storage key of the prevention mode flag.
pub const PREVENTION_MODE_KEY: &str = "prevention_mode";

/// Prevention mode flag as stored in the database.
///
/// When enabled, the WAF blocks flagged requests instead of only logging them.
#[derive(Debug, Clone, PartialEq)]
pub struct PreventionSetting {
    pub enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl PreventionSetting {
    pub fn new(enabled: bool, updated_at: DateTime<Utc>) -> Self {
        Self {
            enabled,
            updated_at,
        }
    }
}
