//! Defines the metrics a deployment requests from the weather provider and
//! the [`MetricProfile`] configuration value that enumerates them.
//!
//! The profile is fixed when the pipeline is constructed; it decides both the
//! provider query (`elements=...`) and the cache file's column schema.

use std::fmt;

/// A single daily weather metric the provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Daily minimum temperature.
    TempMin,
    /// Daily average temperature.
    TempAvg,
    /// Daily maximum temperature.
    TempMax,
    /// Daily average relative humidity.
    Humidity,
}

impl Metric {
    /// Column name used in the persisted cache and in observation records.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::TempMin => "temp_min",
            Metric::TempAvg => "temp_avg",
            Metric::TempMax => "temp_max",
            Metric::Humidity => "humidity",
        }
    }

    /// Field name in the provider's timeline response, also used in the
    /// `elements` query parameter.
    pub(crate) fn element_name(&self) -> &'static str {
        match self {
            Metric::TempMin => "tempmin",
            Metric::TempAvg => "temp",
            Metric::TempMax => "tempmax",
            Metric::Humidity => "humidity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// The ordered set of metrics a deployment fetches, normalizes and persists.
///
/// Construction deduplicates while preserving first-seen order, so the cache
/// column order is stable for a given profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricProfile {
    metrics: Vec<Metric>,
}

impl MetricProfile {
    /// Creates a profile from the given metrics, dropping duplicates.
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Self {
        let mut deduped = Vec::new();
        for metric in metrics {
            if !deduped.contains(&metric) {
                deduped.push(metric);
            }
        }
        Self { metrics: deduped }
    }

    /// Profile requesting only the daily maximum temperature.
    pub fn max_temp_only() -> Self {
        Self::new([Metric::TempMax])
    }

    /// Profile requesting min/avg/max temperature and humidity.
    pub fn full() -> Self {
        Self::new([
            Metric::TempMin,
            Metric::TempAvg,
            Metric::TempMax,
            Metric::Humidity,
        ])
    }

    /// The metrics in this profile, in cache column order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Value of the provider's `elements` query parameter. The `datetime`
    /// element is always requested first since every record needs a date.
    pub(crate) fn elements_param(&self) -> String {
        let mut elements = vec!["datetime"];
        elements.extend(self.metrics.iter().map(Metric::element_name));
        elements.join(",")
    }

    /// Cache column names in profile order, without the key columns.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(Metric::column_name).collect()
    }
}

impl Default for MetricProfile {
    fn default() -> Self {
        Self::full()
    }
}
