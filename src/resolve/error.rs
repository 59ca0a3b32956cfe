use reqwest::StatusCode;
use thiserror::Error;

/// Errors from resolving a postal code to a location.
#[derive(Debug, Error)]
pub enum ResolveError {
    // The provider answered but had no match; never surfaces the provider's
    // own response shape.
    #[error("no location found for postal code '{0}'")]
    NotFound(String),

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode geocoder response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("geocoder returned malformed coordinate '{value}' for postal code '{postal_code}'")]
    MalformedCoordinate {
        postal_code: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}
