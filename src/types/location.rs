//! The canonical location a postal code resolves to.

use serde::{Deserialize, Serialize};

/// A postal code resolved to geographic coordinates and a display name.
///
/// Produced by [`crate::resolve::Geocoder::resolve`] once per request and not
/// persisted; the cache keys records by [`ResolvedLocation::location_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// The postal code as supplied by the caller.
    pub postal_code: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Human-readable place name, e.g. "Beverly Hills, Los Angeles County, California".
    pub display_name: String,
}

impl ResolvedLocation {
    /// Key under which this location's observations are stored in the cache.
    pub fn location_key(&self) -> &str {
        &self.postal_code
    }
}
