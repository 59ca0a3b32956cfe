//! Fetches a daily series from the weather provider's timeline endpoint and
//! normalizes the response into [`ObservationRecord`]s.
//!
//! The serde structs below are the only place the provider's JSON field names
//! appear; everything downstream works on the internal schema.

use crate::series::error::SeriesError;
use crate::series::frame::DATE_FORMAT;
use crate::types::location::ResolvedLocation;
use crate::types::metric::{Metric, MetricProfile};
use crate::types::observation::ObservationRecord;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default timeline endpoint of the weather provider.
pub const DEFAULT_TIMELINE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

pub struct SeriesFetcher {
    client: Client,
    base_url: String,
    api_key: String,
    profile: MetricProfile,
}

/// Provider response adapter for the timeline endpoint.
#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    days: Vec<TimelineDay>,
    #[serde(rename = "resolvedAddress")]
    resolved_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimelineDay {
    datetime: String,
    #[serde(default)]
    tempmin: Option<f64>,
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    tempmax: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
}

impl TimelineDay {
    fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TempMin => self.tempmin,
            Metric::TempAvg => self.temp,
            Metric::TempMax => self.tempmax,
            Metric::Humidity => self.humidity,
        }
    }
}

impl SeriesFetcher {
    pub fn new(
        base_url: &str,
        api_key: String,
        profile: MetricProfile,
        timeout: Duration,
    ) -> Result<Self, SeriesError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SeriesError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            profile,
        })
    }

    /// Fetches the inclusive date range for `location` and normalizes the
    /// provider's per-day records, preserving provider (date-ascending) order.
    ///
    /// Fails with [`SeriesError::InvalidDateRange`] before any network call
    /// when `start > end`. A non-success status is
    /// [`SeriesError::ProviderStatus`]; a success with no daily data is
    /// [`SeriesError::EmptyResult`]. No retries at this layer.
    pub async fn fetch(
        &self,
        location: &ResolvedLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ObservationRecord>, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidDateRange { start, end });
        }

        let url = format!(
            "{}/{}/{}/{}",
            self.base_url,
            location.postal_code,
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        );
        let elements = self.profile.elements_param();
        info!("Fetching weather series from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("unitGroup", "us"),
                ("elements", elements.as_str()),
                ("include", "days"),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await
            .map_err(|e| SeriesError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Provider returned {} for {}", status, url);
            let body = response.text().await.unwrap_or_default();
            return Err(SeriesError::ProviderStatus { url, status, body });
        }

        let payload: TimelineResponse = response.json().await.map_err(|e| SeriesError::Decode {
            url: url.clone(),
            source: e,
        })?;

        if payload.days.is_empty() {
            return Err(SeriesError::EmptyResult {
                location_key: location.location_key().to_string(),
                start,
                end,
            });
        }

        let mut records = Vec::with_capacity(payload.days.len());
        for day in &payload.days {
            let date = NaiveDate::parse_from_str(&day.datetime, DATE_FORMAT).map_err(|e| {
                SeriesError::MalformedDate {
                    value: day.datetime.clone(),
                    source: e,
                }
            })?;
            let mut record = ObservationRecord::new(location.location_key(), date);
            for &metric in self.profile.metrics() {
                record.set_metric(metric, day.metric_value(metric));
            }
            records.push(record);
        }

        info!(
            "Normalized {} daily observations for '{}'",
            records.len(),
            payload
                .resolved_address
                .as_deref()
                .unwrap_or(location.location_key())
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_day_maps_provider_fields() {
        let day: TimelineDay = serde_json::from_str(
            r#"{"datetime":"2024-01-01","tempmin":40.1,"temp":50.2,"tempmax":60.3,"humidity":55.0}"#,
        )
        .unwrap();

        assert_eq!(day.metric_value(Metric::TempMin), Some(40.1));
        assert_eq!(day.metric_value(Metric::TempAvg), Some(50.2));
        assert_eq!(day.metric_value(Metric::TempMax), Some(60.3));
        assert_eq!(day.metric_value(Metric::Humidity), Some(55.0));
    }

    #[test]
    fn absent_provider_fields_stay_none() {
        let day: TimelineDay =
            serde_json::from_str(r#"{"datetime":"2024-01-01","tempmax":60.3}"#).unwrap();

        assert_eq!(day.metric_value(Metric::TempMax), Some(60.3));
        assert_eq!(day.metric_value(Metric::TempMin), None);
        assert_eq!(day.metric_value(Metric::Humidity), None);
    }

    #[test]
    fn response_without_days_field_parses_empty() {
        let payload: TimelineResponse =
            serde_json::from_str(r#"{"resolvedAddress":"Beverly Hills, CA"}"#).unwrap();
        assert!(payload.days.is_empty());
    }
}
