//! MaxMind GeoLite2-City backed locator.

use super::service::{GeoError, GeoLocation, GeoLocator};
use maxminddb::{MaxMindDBError, Reader, geoip2};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use tracing::info;

/// Locator reading a GeoLite2-City (or GeoIP2-City) database.
///
/// The whole file is loaded into memory at startup; lookups never touch disk.
pub struct MaxMindLocator {
    reader: Reader<Vec<u8>>,
}

impl MaxMindLocator {
    /// Opens the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Open`] if the file is missing or is not a valid
    /// MaxMind database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path)
            .map_err(|e| GeoError::Open(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            database_type = %reader.metadata.database_type,
            build_epoch = reader.metadata.build_epoch,
            "GeoIP database loaded"
        );

        Ok(Self { reader })
    }

    /// Builds a locator from an in-memory database image.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Open`] if the bytes are not a valid MaxMind database.
    #[cfg(test)]
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self, GeoError> {
        let reader = Reader::from_source(buf).map_err(|e| GeoError::Open(e.to_string()))?;
        Ok(Self { reader })
    }
}

fn english_name(names: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    names.and_then(|n| n.get("en")).map(|s| (*s).to_string())
}

fn to_location(record: &geoip2::City) -> GeoLocation {
    GeoLocation {
        country: record
            .country
            .as_ref()
            .and_then(|c| english_name(c.names.as_ref())),
        country_code: record
            .country
            .as_ref()
            .and_then(|c| c.iso_code)
            .map(str::to_string),
        city: record
            .city
            .as_ref()
            .and_then(|c| english_name(c.names.as_ref())),
        latitude: record.location.as_ref().and_then(|l| l.latitude),
        longitude: record.location.as_ref().and_then(|l| l.longitude),
    }
}

impl GeoLocator for MaxMindLocator {
    fn lookup(&self, ip: IpAddr) -> Result<Option<GeoLocation>, GeoError> {
        match self.reader.lookup::<geoip2::City>(ip) {
            Ok(record) => Ok(Some(to_location(&record))),
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(None),
            Err(e) => Err(GeoError::Lookup(e.to_string())),
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}
