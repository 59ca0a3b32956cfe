use crate::resolve::error::ResolveError;
use crate::series::error::SeriesError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZipWeatherError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    // Startup-time fatal configuration error; never produced per-request.
    #[error("required environment variable '{0}' is not set")]
    MissingApiKey(&'static str),

    #[error("failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("failed to create cache directory for '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),
}
