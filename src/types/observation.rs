//! The normalized per-day observation schema shared by the fetcher and the
//! cache, independent of any provider's response shape.

use crate::types::metric::Metric;
use chrono::NaiveDate;

/// One normalized daily observation for a location.
///
/// `(location_key, date)` is the natural key; the persisted dataset never
/// holds two records sharing it. Metrics outside the active
/// [`crate::MetricProfile`] stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    /// Cache key for the location, the postal code in this deployment.
    pub location_key: String,
    /// Calendar day the observation covers.
    pub date: NaiveDate,
    /// Daily minimum temperature.
    pub temp_min: Option<f64>,
    /// Daily average temperature.
    pub temp_avg: Option<f64>,
    /// Daily maximum temperature.
    pub temp_max: Option<f64>,
    /// Daily average relative humidity.
    pub humidity: Option<f64>,
}

impl ObservationRecord {
    /// Creates a record with all metric values unset.
    pub fn new(location_key: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            location_key: location_key.into(),
            date,
            temp_min: None,
            temp_avg: None,
            temp_max: None,
            humidity: None,
        }
    }

    /// Reads the value stored for `metric`.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TempMin => self.temp_min,
            Metric::TempAvg => self.temp_avg,
            Metric::TempMax => self.temp_max,
            Metric::Humidity => self.humidity,
        }
    }

    /// Sets the value stored for `metric`.
    pub fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::TempMin => self.temp_min = value,
            Metric::TempAvg => self.temp_avg = value,
            Metric::TempMax => self.temp_max = value,
            Metric::Humidity => self.humidity = value,
        }
    }
}
