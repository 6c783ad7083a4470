//! Domain layer: what the WAF logged and how the dashboard aggregates it.
//!
//! - [`entities`] - Log entries, the prevention switch and the aggregate views
//! - [`repositories`] - Read access to the log and the settings store
//!
//! The WAF engine owns the log; nothing in this crate writes `waf_logs`.
//! Repository traits keep the services independent of PostgreSQL so they
//! can be tested against mocks.

pub mod entities;
pub mod repositories;
