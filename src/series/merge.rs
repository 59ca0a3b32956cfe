//! The cache merge: concatenate, deduplicate on the natural key keeping the
//! last occurrence, re-sort.

use crate::series::error::SeriesError;
use crate::series::frame::{DATE_COLUMN, LOCATION_KEY_COLUMN};
use polars::prelude::*;

/// Merges freshly fetched rows into the existing cache frame.
///
/// Incoming rows are appended after existing ones, so keep-last dedup on
/// `(location_key, date)` makes fresh data win over stale cached data for
/// overlapping dates. The result is explicitly re-sorted ascending by
/// `(location_key, date)` — a naive append+dedup leaves rows out of order and
/// downstream chart renderers need a monotonic x-axis.
pub(crate) fn merge_frames(
    existing: &DataFrame,
    incoming: &DataFrame,
) -> Result<DataFrame, SeriesError> {
    let combined = existing.vstack(incoming)?;
    let subset = [LOCATION_KEY_COLUMN.to_string(), DATE_COLUMN.to_string()];
    let deduped = combined.unique_stable(Some(subset.as_slice()), UniqueKeepStrategy::Last, None)?;
    let sorted = deduped.sort(
        [LOCATION_KEY_COLUMN, DATE_COLUMN],
        SortMultipleOptions::default(),
    )?;
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_col(frame: &DataFrame) -> Vec<Option<f64>> {
        frame
            .column("temp_max")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn date_col(frame: &DataFrame) -> Vec<String> {
        frame
            .column("date")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|d| d.unwrap().to_string())
            .collect()
    }

    #[test]
    fn later_fetch_wins_for_overlapping_dates() {
        // Cache starts with (90210, 2024-01-01, 60); a new fetch reports 65
        // for that day plus a new day.
        let existing = df!(
            "location_key" => ["90210"],
            "date" => ["2024-01-01"],
            "temp_max" => [60.0],
        )
        .unwrap();
        let incoming = df!(
            "location_key" => ["90210", "90210"],
            "date" => ["2024-01-01", "2024-01-02"],
            "temp_max" => [65.0, 70.0],
        )
        .unwrap();

        let merged = merge_frames(&existing, &incoming).unwrap();

        assert_eq!(merged.height(), 2);
        assert_eq!(date_col(&merged), ["2024-01-01", "2024-01-02"]);
        assert_eq!(max_col(&merged), [Some(65.0), Some(70.0)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let existing = df!(
            "location_key" => ["10001", "10001"],
            "date" => ["2024-03-01", "2024-03-02"],
            "temp_max" => [41.0, 44.0],
        )
        .unwrap();
        let incoming = df!(
            "location_key" => ["10001", "10001"],
            "date" => ["2024-03-02", "2024-03-03"],
            "temp_max" => [45.0, 47.0],
        )
        .unwrap();

        let once = merge_frames(&existing, &incoming).unwrap();
        let twice = merge_frames(&once, &incoming).unwrap();

        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn merged_cache_is_sorted_by_date_within_location() {
        // Incoming rows for an earlier month must not trail the existing
        // later rows after the merge.
        let existing = df!(
            "location_key" => ["60601"],
            "date" => ["2024-02-10"],
            "temp_max" => [30.0],
        )
        .unwrap();
        let incoming = df!(
            "location_key" => ["60601", "60601"],
            "date" => ["2024-01-05", "2024-01-06"],
            "temp_max" => [25.0, 26.0],
        )
        .unwrap();

        let merged = merge_frames(&existing, &incoming).unwrap();

        assert_eq!(
            date_col(&merged),
            ["2024-01-05", "2024-01-06", "2024-02-10"]
        );
    }

    #[test]
    fn locations_do_not_collide() {
        let existing = df!(
            "location_key" => ["90210"],
            "date" => ["2024-01-01"],
            "temp_max" => [60.0],
        )
        .unwrap();
        let incoming = df!(
            "location_key" => ["10001"],
            "date" => ["2024-01-01"],
            "temp_max" => [35.0],
        )
        .unwrap();

        let merged = merge_frames(&existing, &incoming).unwrap();

        assert_eq!(merged.height(), 2);
        assert_eq!(max_col(&merged), [Some(35.0), Some(60.0)]);
    }
}
