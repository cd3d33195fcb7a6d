//! Date-indexed series

use chrono::NaiveDate;

use super::ShapeError;

/// Header and cell date formats seen in the sources: ISO dates in the NYT
/// tables, `m/d/yy` column headers in the JHU time series.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// A named sequence of (date, value) points with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    points: Vec<(NaiveDate, i64)>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, i64)>) -> Result<Self, ShapeError> {
        let name = name.into();
        if let Some(w) = points.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(ShapeError::Alignment(format!(
                "series '{}' dates out of order: {} then {}",
                name, w[0].0, w[1].0
            )));
        }
        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn points(&self) -> &[(NaiveDate, i64)] {
        &self.points
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same length and same dates in the same order.
    pub fn aligned_with(&self, other: &TimeSeries) -> bool {
        self.len() == other.len() && self.dates().eq(other.dates())
    }

    /// (first, last) date, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    /// (min, max) value, if any.
    pub fn value_span(&self) -> Option<(i64, i64)> {
        let min = self.points.iter().map(|(_, v)| *v).min()?;
        let max = self.points.iter().map(|(_, v)| *v).max()?;
        Some((min, max))
    }
}
