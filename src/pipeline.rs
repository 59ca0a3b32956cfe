//! The main entry point: resolve a postal code, fetch the series, merge it
//! into the persisted cache and hand back the requested slice.

use crate::config::PipelineConfig;
use crate::error::ZipWeatherError;
use crate::filtering::SeriesFrameFilterExt;
use crate::resolve::geocoder::Geocoder;
use crate::series::error::SeriesError;
use crate::series::fetcher::SeriesFetcher;
use crate::series::frame::{frame_to_records, records_to_frame};
use crate::series::store::{CsvStore, SeriesStore};
use crate::types::metric::MetricProfile;
use crate::types::observation::ObservationRecord;
use crate::utils::ensure_parent_dir_exists;
use bon::bon;
use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoLazy};

/// The fetch-normalize-cache pipeline client.
///
/// Each [`ZipWeather::get_series`] call is one synchronous sequence:
/// resolve → fetch → merge → persist → slice. The store serializes merges
/// internally, so the client can be shared across concurrent requests.
///
/// # Examples
///
/// ```no_run
/// # use zipweather::{ZipWeather, ZipWeatherError};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ZipWeatherError> {
/// let client = ZipWeather::from_env().await?;
/// let series = client
///     .get_series()
///     .postal_code("90210")
///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
///     .call()
///     .await?;
/// for record in &series {
///     println!("{} {:?}", record.date, record.temp_max);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ZipWeather<S = CsvStore> {
    geocoder: Geocoder,
    fetcher: SeriesFetcher,
    store: S,
    profile: MetricProfile,
}

impl ZipWeather<CsvStore> {
    /// Builds a pipeline from the process environment.
    ///
    /// Fails with [`ZipWeatherError::MissingApiKey`] when the provider key is
    /// absent — a startup error, never a per-request one.
    pub async fn from_env() -> Result<Self, ZipWeatherError> {
        Self::with_config(PipelineConfig::from_env()?).await
    }

    /// Builds a pipeline over the flat-file store at `config.cache_file`,
    /// creating the containing directory if needed.
    pub async fn with_config(config: PipelineConfig) -> Result<Self, ZipWeatherError> {
        ensure_parent_dir_exists(&config.cache_file)
            .await
            .map_err(|e| ZipWeatherError::CacheDirCreation(config.cache_file.clone(), e))?;
        let store = CsvStore::new(config.cache_file.clone(), config.profile.clone());
        Self::with_store(config, store)
    }
}

#[bon]
impl<S: SeriesStore> ZipWeather<S> {
    /// Builds a pipeline over an injected [`SeriesStore`] implementation.
    pub fn with_store(config: PipelineConfig, store: S) -> Result<Self, ZipWeatherError> {
        let geocoder = Geocoder::new(&config.geocoder_url, config.request_timeout)?;
        let fetcher = SeriesFetcher::new(
            &config.timeline_url,
            config.api_key.clone(),
            config.profile.clone(),
            config.request_timeout,
        )?;
        Ok(Self {
            geocoder,
            fetcher,
            store,
            profile: config.profile,
        })
    }

    /// The single inbound operation: fetch the series for a postal code and
    /// inclusive date range, merge it into the cache and return the requested
    /// slice, date-ascending.
    ///
    /// # Errors
    ///
    /// * [`SeriesError::InvalidDateRange`] — `start_date > end_date`; no
    ///   network call is made.
    /// * [`crate::ResolveError::NotFound`] — the postal code did not resolve.
    /// * [`SeriesError::ProviderStatus`] / [`SeriesError::NetworkRequest`] —
    ///   provider failure; the cache is left untouched.
    /// * [`SeriesError::EmptyResult`] — valid request, no data for the range.
    #[builder]
    pub async fn get_series(
        &self,
        postal_code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ObservationRecord>, ZipWeatherError> {
        // Reject a backwards range before the resolver touches the network.
        if start_date > end_date {
            return Err(SeriesError::InvalidDateRange {
                start: start_date,
                end: end_date,
            }
            .into());
        }

        let location = self.geocoder.resolve(postal_code).await?;
        let incoming = self.fetcher.fetch(&location, start_date, end_date).await?;

        let incoming_frame = records_to_frame(&incoming, &self.profile)?;
        let merged = self.store.merge_and_save(incoming_frame).await?;

        let slice = merged
            .lazy()
            .filter_location(location.location_key())
            .filter_date_range(start_date, end_date)
            .collect()
            .map_err(SeriesError::from)?;
        Ok(frame_to_records(&slice, &self.profile)?)
    }

    /// Loads the full persisted cache without contacting any provider.
    pub async fn cached_series(&self) -> Result<DataFrame, ZipWeatherError> {
        self.store.load().await.map_err(Into::into)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
