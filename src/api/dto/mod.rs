//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization; timestamps are rendered as
//! RFC 3339 strings.

pub mod analytics;
pub mod health;
pub mod logs;
pub mod prevention;
pub mod status;
