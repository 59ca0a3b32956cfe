//! Filtering helpers for slicing the cache frame.

use crate::series::frame::{DATE_COLUMN, DATE_FORMAT, LOCATION_KEY_COLUMN};
use chrono::NaiveDate;
use polars::prelude::{col, lit, LazyFrame};

/// Extension trait for slicing a series cache `LazyFrame`.
///
/// The cache stores dates as ISO `YYYY-MM-DD` strings, so plain string
/// comparison gives chronological range filtering.
pub trait SeriesFrameFilterExt {
    /// Keeps only rows for the given location key.
    fn filter_location(self, location_key: &str) -> LazyFrame;

    /// Keeps only rows within the date range (inclusive on both ends).
    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame;
}

impl SeriesFrameFilterExt for LazyFrame {
    fn filter_location(self, location_key: &str) -> LazyFrame {
        self.filter(col(LOCATION_KEY_COLUMN).eq(lit(location_key.to_string())))
    }

    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame {
        let start_str = start.format(DATE_FORMAT).to_string();
        let end_str = end.format(DATE_FORMAT).to_string();
        self.filter(
            col(DATE_COLUMN)
                .gt_eq(lit(start_str))
                .and(col(DATE_COLUMN).lt_eq(lit(end_str))),
        )
    }
}
