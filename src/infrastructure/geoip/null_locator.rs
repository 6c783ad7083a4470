//! Locator used when no GeoIP database could be loaded.

use super::service::{GeoError, GeoLocation, GeoLocator};
use std::net::IpAddr;
use tracing::debug;

/// A locator without a database.
///
/// Every lookup fails with [`GeoError::Unavailable`], so attack origins are
/// skipped instead of being attributed to a wrong country.
pub struct NullLocator;

impl NullLocator {
    pub fn new() -> Self {
        debug!("Using NullLocator (GeoIP disabled)");
        Self
    }
}

impl Default for NullLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLocator for NullLocator {
    fn lookup(&self, _ip: IpAddr) -> Result<Option<GeoLocation>, GeoError> {
        Err(GeoError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}
