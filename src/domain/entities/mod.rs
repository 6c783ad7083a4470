//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`WafLog`] - A request inspected by the WAF
//! - [`ActivityPoint`] - Timestamp and verdict of a logged request
//! - [`PreventionSetting`] - The blocking/monitoring switch of the WAF
//! - [`TimelineBucket`], [`AnomalousIp`], [`IpAttackSummary`],
//!   [`CountryAttackStats`] - Aggregates computed from the log

pub mod analytics;
pub mod setting;
pub mod waf_log;

pub use analytics::{AnomalousIp, CountryAttackStats, IpAttackSummary, RuleCount, TimelineBucket};
pub use setting::{PREVENTION_MODE_KEY, PreventionSetting};
pub use waf_log::{ActivityPoint, WafLog};
