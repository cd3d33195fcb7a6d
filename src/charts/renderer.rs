//! Chart Renderer
//! Entry points from shaped data to the three artifact kinds.

use super::{
    ColorBounds, Choropleth, LineChart, RenderError, RowLimit, TableColumn, TableGrid,
};
use crate::data::TimeSeries;

pub struct ChartRenderer;

impl ChartRenderer {
    /// Colour each location by its value, clamped to `bounds`.
    pub fn choropleth(
        locations: &[String],
        values: &[i64],
        bounds: ColorBounds,
    ) -> Result<Choropleth, RenderError> {
        Choropleth::new(locations, values, bounds)
    }

    /// A single series as a plain line.
    pub fn line(title: &str, series: TimeSeries) -> LineChart {
        LineChart::new(title, vec![series])
    }

    /// Several series on one date axis, each filled to zero. Trace order
    /// follows `series_set`.
    pub fn multi_line(title: &str, series_set: Vec<TimeSeries>) -> LineChart {
        LineChart::new(title, series_set).filled()
    }

    pub fn table(columns: Vec<TableColumn>, limit: RowLimit) -> Result<TableGrid, RenderError> {
        TableGrid::new(columns, limit)
    }
}
