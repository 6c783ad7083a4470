//! Geolocation trait and error types.

use std::net::IpAddr;

/// Errors that can occur while resolving IP locations.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("GeoIP database could not be opened: {0}")]
    Open(String),
    #[error("GeoIP database is not loaded")]
    Unavailable,
    #[error("GeoIP lookup failed: {0}")]
    Lookup(String),
}

/// Approximate location of an IP address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLocation {
    /// English country name.
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    pub country_code: Option<String>,
    /// English city name.
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoLocation {
    /// Returns the country name or `"Unknown"` when the record has none.
    pub fn country_label(&self) -> &str {
        self.country.as_deref().unwrap_or("Unknown")
    }

    /// Returns both coordinates when the record carries them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Resolves IP addresses to locations.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::MaxMindLocator`] - GeoLite2-City database reader
/// - [`crate::infrastructure::geoip::NullLocator`] - Placeholder when no database is loaded
#[cfg_attr(test, mockall::automock)]
pub trait GeoLocator: Send + Sync {
    /// Looks up an address.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(location))` when the database has a record
    /// - `Ok(None)` when the address is not in the database
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the database is missing or corrupt.
    fn lookup(&self, ip: IpAddr) -> Result<Option<GeoLocation>, GeoError>;

    /// Reports whether a database is loaded. Used by the health check.
    fn is_available(&self) -> bool;
}
