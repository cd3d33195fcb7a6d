//! Data Processor Module
//! Column projection, derived metrics and display cells.

use polars::prelude::*;
use std::fmt;
use thiserror::Error;

use super::TimeSeries;

/// Sentinel shown in place of an unreported count.
pub const NO_DATA: &str = "No Data";

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Schema error: column '{column}' not found")]
    Schema { column: String },
    #[error("Schema error: no row with {column} = '{key}'")]
    MissingRow { column: String, key: String },
    #[error("Alignment error: {0}")]
    Alignment(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

impl ShapeError {
    pub(crate) fn schema(column: &str) -> Self {
        Self::Schema {
            column: column.to_string(),
        }
    }
}

/// One table cell after shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(i64),
    NoData,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{n}"),
            Cell::NoData => f.write_str(NO_DATA),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Count(n)
    }
}

impl From<Option<i64>> for Cell {
    fn from(n: Option<i64>) -> Self {
        n.map_or(Cell::NoData, Cell::Count)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Handles column selection and derived metrics.
pub struct DataProcessor;

impl DataProcessor {
    /// Fail with `Schema` for the first name not present in `df`.
    pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<(), ShapeError> {
        match columns.iter().find(|name| df.column(name).is_err()) {
            Some(missing) => Err(ShapeError::schema(missing)),
            None => Ok(()),
        }
    }

    /// Keep only `keep`, in that order.
    pub fn project(df: &DataFrame, keep: &[&str]) -> Result<DataFrame, ShapeError> {
        Self::require_columns(df, keep)?;
        Ok(df.select(keep.iter().copied())?)
    }

    /// Drop `columns`, keeping the rest in source order.
    pub fn drop_columns(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, ShapeError> {
        Self::require_columns(df, columns)?;

        let remaining: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| !columns.contains(&name.as_str()))
            .collect();

        Ok(df.select(remaining)?)
    }

    /// Rows where `column` equals `value`. Absent columns leave the table as is.
    pub fn filter_eq(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame, ShapeError> {
        if df.column(column).is_err() {
            return Ok(df.clone());
        }
        let filtered = df
            .clone()
            .lazy()
            .filter(col(column).eq(lit(value)))
            .collect()?;
        Ok(filtered)
    }

    /// active = cases - deaths - recovered, per date.
    ///
    /// All three series must share the same dates in the same order.
    pub fn derive_active(
        cases: &TimeSeries,
        deaths: &TimeSeries,
        recovered: &TimeSeries,
    ) -> Result<TimeSeries, ShapeError> {
        for other in [deaths, recovered] {
            if !cases.aligned_with(other) {
                return Err(ShapeError::Alignment(format!(
                    "'{}' has {} points, '{}' has {} (or their dates differ)",
                    cases.name(),
                    cases.len(),
                    other.name(),
                    other.len()
                )));
            }
        }

        let points = cases
            .points()
            .iter()
            .zip(deaths.points())
            .zip(recovered.points())
            .map(|((&(date, c), &(_, d)), &(_, r))| (date, c - d - r))
            .collect();

        TimeSeries::new("Active Cases", points)
    }

    /// Recovered counts of zero or below (or absent) are shown as "No Data".
    ///
    /// The sources report unknown recoveries as 0, so a genuine zero is
    /// indistinguishable from a missing value here.
    pub fn fill_missing(recovered: Option<i64>) -> Cell {
        match recovered {
            Some(n) if n > 0 => Cell::Count(n),
            _ => Cell::NoData,
        }
    }
}
