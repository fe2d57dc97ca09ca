//! Table builder for interval series
//!
//! Expands an [`IntervalSeries`] into a [`DataFrame`] with one row per step of
//! `[start, end)`: a `date` column followed by one `f64` column per variable.

use chrono::{DateTime, Duration, Utc};
use polars::prelude::*;
use thiserror::Error;

use crate::data::IntervalSeries;

/// Name of the timestamp column
pub const DATE_COLUMN: &str = "date";

/// Errors that can occur when building a table
#[derive(Debug, Error)]
pub enum TableError {
    /// Interval length must be positive
    #[error("Invalid interval length: {0} s")]
    InvalidInterval(i64),

    /// End of the series lies before its start
    #[error("Series ends at {end} before it starts at {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A value column does not have one value per generated timestamp
    #[error("Column '{variable}' has {actual} values but the series has {expected} timestamps")]
    LengthMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to assemble table: {0}")]
    Frame(#[from] PolarsError),
}

/// Timestamps from `start` (inclusive) to `end` (exclusive) stepped by `interval_seconds`
pub fn interval_timestamps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_seconds: i64,
) -> Result<Vec<DateTime<Utc>>, TableError> {
    if interval_seconds <= 0 {
        return Err(TableError::InvalidInterval(interval_seconds));
    }
    if end < start {
        return Err(TableError::InvalidRange { start, end });
    }

    // `span + interval - 1` would overflow for intervals near i64::MAX
    let span = (end - start).num_seconds();
    let count = span / interval_seconds + i64::from(span % interval_seconds != 0);

    // Every offset stays below `span`
    Ok((0..count)
        .map(|i| start + Duration::seconds(interval_seconds * i))
        .collect())
}

/// Check that every column holds one value per generated timestamp
///
/// Returns the generated timestamps on success.
pub fn validate_series(series: &IntervalSeries) -> Result<Vec<DateTime<Utc>>, TableError> {
    let times = interval_timestamps(series.start, series.end, series.interval_seconds)?;

    for column in &series.columns {
        if column.values.len() != times.len() {
            return Err(TableError::LengthMismatch {
                variable: column.variable.clone(),
                expected: times.len(),
                actual: column.values.len(),
            });
        }
    }

    Ok(times)
}

/// Build the table for a series
///
/// Row `i` pairs the `i`-th generated timestamp with element `i` of every
/// column. A column whose length differs from the timestamp count is an error,
/// never truncated. Missing values become nulls.
pub fn build_table(series: &IntervalSeries) -> Result<DataFrame, TableError> {
    let times = validate_series(series)?;

    let millis: Vec<i64> = times.iter().map(DateTime::timestamp_millis).collect();
    let date = Column::new(DATE_COLUMN.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    let mut columns = Vec::with_capacity(series.columns.len() + 1);
    columns.push(date);
    columns.extend(
        series
            .columns
            .iter()
            .map(|c| Column::new(c.variable.as_str().into(), c.values.as_slice())),
    );

    Ok(DataFrame::new(columns)?)
}
