//! Charts module - turns shaped data into maps, line charts and tables

mod choropleth;
mod palette;
mod plotter;
mod renderer;
mod table;

pub use choropleth::{Choropleth, MapView, ShadedRegion};
pub use palette::{css_hex, ColorBounds, ColorScale, CASE_SCALE, PAGE_BACKGROUND, PANEL_BACKGROUND};
pub use plotter::LineChart;
pub use renderer::ChartRenderer;
pub use table::{RowLimit, TableColumn, TableGrid};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Alignment error: {0}")]
    Alignment(String),
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
}

/// A finished visual, ready to be placed on the page.
#[derive(Debug, Clone)]
pub enum RenderedArtifact {
    Choropleth(Choropleth),
    Line(LineChart),
    Table(TableGrid),
}

impl From<Choropleth> for RenderedArtifact {
    fn from(map: Choropleth) -> Self {
        RenderedArtifact::Choropleth(map)
    }
}

impl From<LineChart> for RenderedArtifact {
    fn from(chart: LineChart) -> Self {
        RenderedArtifact::Line(chart)
    }
}

impl From<TableGrid> for RenderedArtifact {
    fn from(table: TableGrid) -> Self {
        RenderedArtifact::Table(table)
    }
}

/// Thousands-separated integer, e.g. `1234567` -> `1,234,567`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_counts_with_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(-45000), "-45,000");
    }
}
