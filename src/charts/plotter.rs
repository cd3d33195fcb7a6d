//! Line Chart Plotter
//! Plots one or more date-indexed series on a shared axis with plotters.

use chrono::{Days, NaiveDate};
use plotters::prelude::*;

use super::palette::{series_color, CHART_BACKGROUND, GRID, TEXT};
use super::{format_count, RenderError};
use crate::data::TimeSeries;

/// One or more series against a shared date axis.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<TimeSeries>,
    /// Fill each trace down to zero
    pub filled: bool,
    size: (u32, u32),
}

impl LineChart {
    pub fn new(title: impl Into<String>, series: Vec<TimeSeries>) -> Self {
        Self {
            title: title.into(),
            x_desc: "date".to_string(),
            y_desc: String::new(),
            series,
            filled: false,
            size: (1000, 450),
        }
    }

    pub fn with_axes(mut self, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        self.x_desc = x_desc.into();
        self.y_desc = y_desc.into();
        self
    }

    pub fn filled(mut self) -> Self {
        self.filled = true;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name()).collect()
    }

    pub fn series_named(&self, name: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.name() == name)
    }

    /// Shared date range over all series; a single day is widened to two.
    fn x_range(&self) -> (NaiveDate, NaiveDate) {
        let spans = self.series.iter().filter_map(|s| s.date_span());
        let (first, last) = spans
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
            .unwrap_or((NaiveDate::MIN, NaiveDate::MIN));
        if first < last {
            (first, last)
        } else {
            (first, first.checked_add_days(Days::new(1)).unwrap_or(first))
        }
    }

    /// Value range, always including zero, padded 5% at the top.
    fn y_range(&self) -> (i64, i64) {
        let (lo, hi) = self
            .series
            .iter()
            .filter_map(|s| s.value_span())
            .fold((0i64, 0i64), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
        let pad = ((hi - lo) / 20).max(1);
        (lo, hi + pad)
    }

    pub fn to_svg(&self) -> Result<String, RenderError> {
        let mut svg = String::new();
        self.draw(&mut svg).map_err(|e| RenderError::Drawing(e.to_string()))?;
        Ok(svg)
    }

    fn draw(&self, out: &mut String) -> Result<(), Box<dyn std::error::Error>> {
        let root = SVGBackend::with_string(out, self.size).into_drawing_area();
        root.fill(&CHART_BACKGROUND)?;

        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22).into_font().color(&TEXT))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(6)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .x_label_formatter(&|d: &NaiveDate| d.format("%b %Y").to_string())
            .y_label_formatter(&|v: &i64| format_count(*v))
            .label_style(("sans-serif", 12).into_font().color(&TEXT))
            .axis_desc_style(("sans-serif", 14).into_font().color(&TEXT))
            .axis_style(GRID.stroke_width(1))
            .bold_line_style(GRID.stroke_width(1))
            .light_line_style(CHART_BACKGROUND.stroke_width(0))
            .draw()?;

        for (i, series) in self.series.iter().enumerate() {
            let color = series_color(i);
            let points = series.points().iter().copied();

            let drawn = if self.filled {
                chart.draw_series(
                    AreaSeries::new(points, 0, color.mix(0.25).filled()).border_style(color.stroke_width(2)),
                )?
            } else {
                chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?
            };
            drawn
                .label(series.name())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        if self.series.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font(("sans-serif", 13).into_font().color(&TEXT))
                .background_style(CHART_BACKGROUND.mix(0.8).filled())
                .border_style(GRID.stroke_width(1))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}
