//! Pipeline configuration: environment-driven for deployments, builder-driven
//! for tests and embedding.

use crate::error::ZipWeatherError;
use crate::resolve::geocoder::DEFAULT_GEOCODER_URL;
use crate::series::fetcher::DEFAULT_TIMELINE_URL;
use crate::types::metric::MetricProfile;
use crate::utils;
use bon::bon;
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the weather provider API key.
pub const API_KEY_ENV: &str = "VC_API_KEY";

/// Optional environment variable overriding the cache file location.
pub const CACHE_FILE_ENV: &str = "ZIPWEATHER_CACHE_FILE";

/// Applied to both the geocoder and the weather provider requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Weather provider API key.
    pub api_key: String,
    /// Base URL of the provider's timeline endpoint.
    pub timeline_url: String,
    /// Base URL of the geocoding endpoint.
    pub geocoder_url: String,
    /// Location of the persisted series cache.
    pub cache_file: PathBuf,
    /// Metrics this deployment fetches and persists.
    pub profile: MetricProfile,
    /// HTTP timeout for outbound requests.
    pub request_timeout: Duration,
}

#[bon]
impl PipelineConfig {
    /// Builder entry point. `api_key` and `cache_file` are required; endpoint
    /// URLs, metric profile and timeout fall back to defaults.
    #[builder]
    pub fn new(
        api_key: String,
        cache_file: PathBuf,
        timeline_url: Option<String>,
        geocoder_url: Option<String>,
        profile: Option<MetricProfile>,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            api_key,
            cache_file,
            timeline_url: timeline_url.unwrap_or_else(|| DEFAULT_TIMELINE_URL.to_string()),
            geocoder_url: geocoder_url.unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
            profile: profile.unwrap_or_default(),
            request_timeout: request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Loads configuration from the process environment (and a `.env` file if
    /// present). A missing or empty API key is fatal here, before any request
    /// is made.
    pub fn from_env() -> Result<Self, ZipWeatherError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ZipWeatherError::MissingApiKey(API_KEY_ENV))?;

        let cache_file = match std::env::var(CACHE_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => utils::default_cache_file().map_err(ZipWeatherError::CacheDirResolution)?,
        };

        Ok(Self::builder()
            .api_key(api_key)
            .cache_file(cache_file)
            .build())
    }
}
