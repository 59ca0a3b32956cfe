//! Resolves a postal code to coordinates and a display name through a
//! Nominatim-style geocoding endpoint.

use crate::resolve::error::ResolveError;
use crate::types::location::ResolvedLocation;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default geocoding endpoint. No API key required.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = concat!("zipweather/", env!("CARGO_PKG_VERSION"));

/// Geocoder response adapter. Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct GeocoderPlace {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ResolveError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves `postal_code` to a canonical location.
    ///
    /// An empty result set from the provider is [`ResolveError::NotFound`];
    /// transport failures and non-success statuses surface directly, no
    /// retries.
    pub async fn resolve(&self, postal_code: &str) -> Result<ResolvedLocation, ResolveError> {
        let url = format!("{}/search", self.base_url);
        debug!("Resolving postal code '{}' via {}", postal_code, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("postalcode", postal_code),
                ("country", "us"),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| ResolveError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    ResolveError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ResolveError::NetworkRequest(url, e)
                });
            }
        };

        let places: Vec<GeocoderPlace> =
            response.json().await.map_err(|e| ResolveError::Decode {
                url: url.clone(),
                source: e,
            })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NotFound(postal_code.to_string()))?;

        let latitude = parse_coordinate(postal_code, &place.lat)?;
        let longitude = parse_coordinate(postal_code, &place.lon)?;

        info!("Resolved '{}' to {}", postal_code, place.display_name);
        Ok(ResolvedLocation {
            postal_code: postal_code.to_string(),
            latitude,
            longitude,
            display_name: place.display_name,
        })
    }
}

fn parse_coordinate(postal_code: &str, value: &str) -> Result<f64, ResolveError> {
    value
        .parse::<f64>()
        .map_err(|e| ResolveError::MalformedCoordinate {
            postal_code: postal_code.to_string(),
            value: value.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoder_place_deserializes_string_coordinates() {
        let place: GeocoderPlace = serde_json::from_str(
            r#"{"lat":"34.0901","lon":"-118.4065","display_name":"Beverly Hills, California, United States"}"#,
        )
        .unwrap();

        assert_eq!(parse_coordinate("90210", &place.lat).unwrap(), 34.0901);
        assert_eq!(parse_coordinate("90210", &place.lon).unwrap(), -118.4065);
    }

    #[test]
    fn malformed_coordinate_is_reported() {
        let err = parse_coordinate("90210", "north-ish").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedCoordinate { .. }));
    }
}
