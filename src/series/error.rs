use chrono::NaiveDate;
use polars::error::PolarsError;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the series fetch/normalize/cache half of the pipeline.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("provider returned status {status} for {url}: {body}")]
    ProviderStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode provider response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Valid request, but the provider has no data for this range/location.
    #[error("provider returned no daily data for '{location_key}' between {start} and {end}")]
    EmptyResult {
        location_key: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("malformed observation date '{value}'")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("required column '{0}' not found in cache frame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("parsing error reading cache file '{0}'")]
    CacheReadPolars(PathBuf, #[source] PolarsError),

    #[error("I/O error writing cache file '{0}'")]
    CacheWriteIo(PathBuf, #[source] std::io::Error),

    #[error("encoding error writing cache file '{0}'")]
    CacheWritePolars(PathBuf, #[source] PolarsError),

    #[error("background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
