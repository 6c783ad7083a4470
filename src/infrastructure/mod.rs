//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and the
//! outbound integrations used by the application services.
//!
//! # Modules
//!
//! - [`geoip`] - IP geolocation (MaxMind database and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`waf`] - Control channel to the WAF engine

pub mod geoip;
pub mod persistence;
pub mod waf;
