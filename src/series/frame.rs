//! Conversions between [`ObservationRecord`]s and the polars frame that backs
//! the persisted cache.
//!
//! Dates are carried as ISO `YYYY-MM-DD` strings inside the frame and the CSV
//! file, so lexicographic order is chronological order and the file stays
//! trivially human-readable.

use crate::series::error::SeriesError;
use crate::types::metric::MetricProfile;
use crate::types::observation::ObservationRecord;
use chrono::NaiveDate;
use polars::prelude::*;

pub(crate) const LOCATION_KEY_COLUMN: &str = "location_key";
pub(crate) const DATE_COLUMN: &str = "date";
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds a frame from normalized records, columns ordered
/// `location_key, date, <profile metrics>`.
pub(crate) fn records_to_frame(
    records: &[ObservationRecord],
    profile: &MetricProfile,
) -> Result<DataFrame, SeriesError> {
    let keys: Vec<&str> = records.iter().map(|r| r.location_key.as_str()).collect();
    let dates: Vec<String> = records
        .iter()
        .map(|r| r.date.format(DATE_FORMAT).to_string())
        .collect();

    let mut columns = vec![
        Column::new(LOCATION_KEY_COLUMN.into(), keys),
        Column::new(DATE_COLUMN.into(), dates),
    ];
    for &metric in profile.metrics() {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.metric(metric)).collect();
        columns.push(Column::new(metric.column_name().into(), values));
    }

    DataFrame::new(columns).map_err(SeriesError::from)
}

/// An empty frame carrying the cache schema for `profile`.
pub(crate) fn empty_frame(profile: &MetricProfile) -> Result<DataFrame, SeriesError> {
    let mut columns = vec![
        Series::new_empty(LOCATION_KEY_COLUMN.into(), &DataType::String).into_column(),
        Series::new_empty(DATE_COLUMN.into(), &DataType::String).into_column(),
    ];
    for &metric in profile.metrics() {
        columns
            .push(Series::new_empty(metric.column_name().into(), &DataType::Float64).into_column());
    }
    DataFrame::new(columns).map_err(SeriesError::from)
}

/// The cache schema for `profile`, used to pin dtypes when reading the CSV
/// back (string keys and dates, float metrics).
pub(crate) fn cache_schema(profile: &MetricProfile) -> Schema {
    let mut fields = vec![
        Field::new(LOCATION_KEY_COLUMN.into(), DataType::String),
        Field::new(DATE_COLUMN.into(), DataType::String),
    ];
    for &metric in profile.metrics() {
        fields.push(Field::new(metric.column_name().into(), DataType::Float64));
    }
    Schema::from_iter(fields)
}

/// Reads records back out of a cache frame, profile metrics only.
pub(crate) fn frame_to_records(
    frame: &DataFrame,
    profile: &MetricProfile,
) -> Result<Vec<ObservationRecord>, SeriesError> {
    let keys = frame
        .column(LOCATION_KEY_COLUMN)
        .map_err(|e| SeriesError::ColumnNotFound(LOCATION_KEY_COLUMN.to_string(), e))?
        .str()?;
    let dates = frame
        .column(DATE_COLUMN)
        .map_err(|e| SeriesError::ColumnNotFound(DATE_COLUMN.to_string(), e))?
        .str()?;

    let mut metric_columns = Vec::with_capacity(profile.metrics().len());
    for &metric in profile.metrics() {
        let column = frame
            .column(metric.column_name())
            .map_err(|e| SeriesError::ColumnNotFound(metric.column_name().to_string(), e))?
            .f64()?;
        metric_columns.push((metric, column));
    }

    let mut records = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        // Key columns are written from owned strings and never null.
        let (Some(key), Some(date_str)) = (keys.get(i), dates.get(i)) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
            SeriesError::MalformedDate {
                value: date_str.to_string(),
                source: e,
            }
        })?;
        let mut record = ObservationRecord::new(key, date);
        for (metric, column) in &metric_columns {
            record.set_metric(*metric, column.get(i));
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metric::Metric;

    fn record(key: &str, date: &str, max: f64) -> ObservationRecord {
        let mut r = ObservationRecord::new(key, date.parse().unwrap());
        r.set_metric(Metric::TempMax, Some(max));
        r
    }

    #[test]
    fn records_roundtrip_through_frame() {
        let profile = MetricProfile::max_temp_only();
        let records = vec![
            record("90210", "2024-01-01", 60.0),
            record("90210", "2024-01-02", 65.0),
        ];

        let frame = records_to_frame(&records, &profile).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(
            frame.get_column_names(),
            ["location_key", "date", "temp_max"]
        );

        let back = frame_to_records(&frame, &profile).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_frame_has_profile_schema() {
        let profile = MetricProfile::full();
        let frame = empty_frame(&profile).unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(
            frame.get_column_names(),
            [
                "location_key",
                "date",
                "temp_min",
                "temp_avg",
                "temp_max",
                "humidity"
            ]
        );
    }

    #[test]
    fn malformed_cache_date_is_reported() {
        let profile = MetricProfile::max_temp_only();
        let frame = df!(
            "location_key" => ["90210"],
            "date" => ["01/02/2024"],
            "temp_max" => [60.0],
        )
        .unwrap();

        let err = frame_to_records(&frame, &profile).unwrap_err();
        assert!(matches!(err, SeriesError::MalformedDate { .. }));
    }
}
