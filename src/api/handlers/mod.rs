//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod logs;
pub mod prevention;
pub mod status;

pub use analytics::{anomalous_ips_handler, attack_origins_handler, attack_timeline_handler};
pub use health::health_handler;
pub use logs::logs_handler;
pub use prevention::{get_prevention_handler, set_prevention_handler};
pub use status::status_handler;
