//! Time Series Aggregator
//! Rolls a wide per-region table (one column per date) into a single series.

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

use crate::data::{parse_date, ShapeError, TimeSeries};

/// A column header that parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub header: String,
    pub date: NaiveDate,
}

/// Sums wide time-series tables across rows.
pub struct Aggregator;

impl Aggregator {
    /// Date-named columns in source order. Other columns are ignored.
    pub fn date_columns(df: &DataFrame) -> Vec<DateColumn> {
        let (dated, skipped): (Vec<_>, Vec<_>) = df
            .get_column_names()
            .into_iter()
            .map(|name| (name.to_string(), parse_date(name.as_str())))
            .partition(|(_, date)| date.is_some());

        if !skipped.is_empty() {
            debug!(skipped = skipped.len(), "ignoring non-date columns");
        }

        dated
            .into_iter()
            .filter_map(|(header, date)| Some(DateColumn { header, date: date? }))
            .collect()
    }

    /// One value per date column: the column summed over every row, nulls as 0.
    pub fn sum_across_rows(
        df: &DataFrame,
        date_columns: &[DateColumn],
        name: &str,
    ) -> Result<TimeSeries, ShapeError> {
        let points = date_columns
            .iter()
            .map(|dc| {
                let col = df
                    .column(&dc.header)
                    .map_err(|_| ShapeError::schema(&dc.header))?
                    .cast(&DataType::Int64)?;
                let total = col.i64()?.sum().unwrap_or(0);
                Ok((dc.date, total))
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;

        TimeSeries::new(name, points)
    }
}
