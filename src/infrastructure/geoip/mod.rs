//! IP geolocation for attack origin maps.
//!
//! Provides a [`GeoLocator`] trait with two implementations:
//! - [`MaxMindLocator`] - GeoLite2-City database reader
//! - [`NullLocator`] - Fallback when the database file is missing

mod maxmind;
mod null_locator;
mod service;

pub use maxmind::MaxMindLocator;
pub use null_locator::NullLocator;
pub use service::{GeoError, GeoLocation, GeoLocator};

#[cfg(test)]
pub use service::MockGeoLocator;
