//! Choropleth Map
//! Shades boundary polygons by case count and draws them to SVG.
//!
//! Projection is equirectangular: longitude on x, latitude on y.

use plotters::prelude::*;
use std::collections::HashMap;
use std::ops::Range;

use super::palette::{ColorBounds, ColorScale, BORDER, LAND, PANEL_BACKGROUND, TEXT};
use super::{format_count, RenderError};
use crate::data::FeatureCollection;

const COLORBAR_WIDTH: u32 = 110;
const COLORBAR_STEPS: usize = 40;

/// Visible lon/lat window.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub lon: Range<f64>,
    pub lat: Range<f64>,
}

impl MapView {
    pub const WORLD: MapView = MapView {
        lon: -180.0..180.0,
        lat: -58.0..84.0,
    };

    pub const CONTIGUOUS_US: MapView = MapView {
        lon: -125.0..-66.0,
        lat: 24.0..50.0,
    };

    /// Clip a ring to the window (Sutherland-Hodgman, one window edge at a
    /// time). Rings entirely outside come back empty.
    pub fn clip(&self, ring: &[(f64, f64)]) -> Vec<(f64, f64)> {
        let (x0, x1) = (self.lon.start, self.lon.end);
        let (y0, y1) = (self.lat.start, self.lat.end);

        let at_x = |x: f64| {
            move |a: (f64, f64), b: (f64, f64)| (x, a.1 + (x - a.0) / (b.0 - a.0) * (b.1 - a.1))
        };
        let at_y = |y: f64| {
            move |a: (f64, f64), b: (f64, f64)| (a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0), y)
        };

        let mut points = ring.to_vec();
        points = clip_edge(&points, |p| p.0 >= x0, at_x(x0));
        points = clip_edge(&points, |p| p.0 <= x1, at_x(x1));
        points = clip_edge(&points, |p| p.1 >= y0, at_y(y0));
        points = clip_edge(&points, |p| p.1 <= y1, at_y(y1));

        if points.len() < 3 {
            Vec::new()
        } else {
            points
        }
    }
}

fn clip_edge(
    points: &[(f64, f64)],
    inside: impl Fn((f64, f64)) -> bool,
    cross: impl Fn((f64, f64), (f64, f64)) -> (f64, f64),
) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() + 4);
    for (i, &current) in points.iter().enumerate() {
        let previous = points[(i + points.len() - 1) % points.len()];
        match (inside(previous), inside(current)) {
            (true, true) => out.push(current),
            (true, false) => out.push(cross(previous, current)),
            (false, true) => {
                out.push(cross(previous, current));
                out.push(current);
            }
            (false, false) => {}
        }
    }
    out
}

/// One location with its value and resolved fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedRegion {
    pub location: String,
    pub value: i64,
    pub fill: RGBColor,
}

#[derive(Debug, Clone)]
pub struct Choropleth {
    pub title: String,
    pub colorbar_title: String,
    pub bounds: ColorBounds,
    pub regions: Vec<ShadedRegion>,
    scale: ColorScale,
    geometry: FeatureCollection,
    view: MapView,
    size: (u32, u32),
}

impl Choropleth {
    /// Colour each location; values outside `bounds` saturate at the nearest end.
    pub fn new(
        locations: &[String],
        values: &[i64],
        bounds: ColorBounds,
    ) -> Result<Self, RenderError> {
        if locations.len() != values.len() {
            return Err(RenderError::Alignment(format!(
                "{} locations but {} values",
                locations.len(),
                values.len()
            )));
        }

        let scale = ColorScale::default();
        let regions = locations
            .iter()
            .zip(values)
            .map(|(location, &value)| ShadedRegion {
                location: location.clone(),
                value,
                fill: scale.color_for(value as f64, bounds),
            })
            .collect();

        Ok(Self {
            title: String::new(),
            colorbar_title: "Cases".to_string(),
            bounds,
            regions,
            scale,
            geometry: FeatureCollection::default(),
            view: MapView::WORLD,
            size: (1000, 520),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_geometry(mut self, geometry: FeatureCollection, view: MapView) -> Self {
        self.geometry = geometry;
        self.view = view;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn region(&self, location: &str) -> Option<&ShadedRegion> {
        self.regions.iter().find(|r| r.location == location)
    }

    /// Regions that have a matching boundary feature.
    pub fn drawable_regions(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| self.geometry.find(&r.location).is_some())
            .count()
    }

    pub fn to_svg(&self) -> Result<String, RenderError> {
        let mut svg = String::new();
        self.draw(&mut svg).map_err(|e| RenderError::Drawing(e.to_string()))?;
        Ok(svg)
    }

    fn draw(&self, out: &mut String) -> Result<(), Box<dyn std::error::Error>> {
        let (width, height) = self.size;
        let root = SVGBackend::with_string(out, (width, height)).into_drawing_area();
        root.fill(&PANEL_BACKGROUND)?;

        let (map_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

        let mut builder = ChartBuilder::on(&map_area);
        builder.margin(10);
        if !self.title.is_empty() {
            builder.caption(&self.title, ("sans-serif", 22).into_font().color(&TEXT));
        }
        let mut chart = builder.build_cartesian_2d(self.view.lon.clone(), self.view.lat.clone())?;

        let fills: HashMap<&str, RGBColor> = self
            .regions
            .iter()
            .map(|r| (r.location.as_str(), r.fill))
            .collect();

        let mut shapes = Vec::new();
        let mut outlines = Vec::new();
        for feature in &self.geometry.features {
            let fill = feature
                .key()
                .and_then(|key| fills.get(key.as_str()).copied())
                .unwrap_or(LAND);
            for ring in feature.outlines() {
                let ring = self.view.clip(&ring);
                if ring.is_empty() {
                    continue;
                }
                outlines.push(PathElement::new(ring.clone(), BORDER.stroke_width(1)));
                shapes.push(Polygon::new(ring, fill.filled()));
            }
        }
        chart.draw_series(shapes)?;
        chart.draw_series(outlines)?;

        self.draw_colorbar(&bar_area)?;
        root.present()?;
        Ok(())
    }

    fn draw_colorbar(
        &self,
        area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let ColorBounds { min, max } = self.bounds;
        let max = if max > min { max } else { min + 1.0 };

        let mut bar = ChartBuilder::on(area)
            .margin_top(40)
            .margin_bottom(40)
            .margin_right(10)
            .y_label_area_size(60)
            .caption(&self.colorbar_title, ("sans-serif", 14).into_font().color(&TEXT))
            .build_cartesian_2d(0f64..1f64, min..max)?;

        bar.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .disable_x_axis()
            .y_labels(5)
            .y_label_formatter(&|v: &f64| format_count(*v as i64))
            .label_style(("sans-serif", 12).into_font().color(&TEXT))
            .axis_style(TEXT.stroke_width(1))
            .draw()?;

        let step = (max - min) / COLORBAR_STEPS as f64;
        bar.draw_series((0..COLORBAR_STEPS).map(|i| {
            let lo = min + step * i as f64;
            let color = self.scale.color_for(lo + step / 2.0, self.bounds);
            Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn saturates_values_outside_bounds() {
        let map = Choropleth::new(
            &keys(&["HI", "CAP", "LO", "ZERO"]),
            &[150_000, 100_000, -5, 0],
            ColorBounds::new(0.0, 100_000.0),
        )
        .unwrap();

        assert_eq!(map.region("HI").unwrap().fill, map.region("CAP").unwrap().fill);
        assert_eq!(map.region("LO").unwrap().fill, map.region("ZERO").unwrap().fill);
        assert_ne!(map.region("HI").unwrap().fill, map.region("LO").unwrap().fill);
    }

    #[test]
    fn mismatched_inputs_fail() {
        let err = Choropleth::new(&keys(&["A", "B"]), &[1], ColorBounds::new(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, RenderError::Alignment(_)));
    }

    #[test]
    fn draws_matching_geometry_to_svg() {
        let geometry = FeatureCollection::from_value(
            "inline",
            json!({"features": [
                {"id": "ITA", "geometry": {"type": "Polygon",
                    "coordinates": [[[7.0, 44.0], [18.0, 40.0], [12.0, 37.0], [7.0, 44.0]]]}},
                {"id": "ESP", "geometry": {"type": "Polygon",
                    "coordinates": [[[-9.0, 43.0], [3.0, 42.0], [-6.0, 36.0], [-9.0, 43.0]]]}}
            ]}),
        )
        .unwrap();

        let map = Choropleth::new(&keys(&["ITA", "FRA"]), &[5000, 10], ColorBounds::new(0.0, 10_000.0))
            .unwrap()
            .with_title("Global Cases")
            .with_geometry(geometry, MapView::WORLD);

        assert_eq!(map.drawable_regions(), 1);
        let svg = map.to_svg().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("Global Cases"));
    }

    fn inside(view: &MapView, ring: &[(f64, f64)]) -> bool {
        ring.iter().all(|&(x, y)| {
            x >= view.lon.start - 1e-9
                && x <= view.lon.end + 1e-9
                && y >= view.lat.start - 1e-9
                && y <= view.lat.end + 1e-9
        })
    }

    #[test]
    fn clip_keeps_rings_inside_the_view() {
        let ring = vec![(-90.0, 30.0), (-80.0, 30.0), (-85.0, 40.0), (-90.0, 30.0)];
        assert_eq!(MapView::CONTIGUOUS_US.clip(&ring), ring);
    }

    #[test]
    fn clip_drops_rings_outside_the_view() {
        // Hawaii
        let ring = vec![(-155.9, 20.2), (-155.0, 19.3), (-154.8, 19.5), (-155.9, 20.2)];
        assert!(MapView::CONTIGUOUS_US.clip(&ring).is_empty());
    }

    #[test]
    fn clip_cuts_rings_crossing_the_edge() {
        // Puerto Rico straddles the eastern edge at -66
        let ring = vec![(-67.3, 18.0), (-65.2, 18.0), (-65.2, 18.5), (-67.3, 18.5), (-67.3, 18.0)];
        let view = MapView {
            lon: -125.0..-66.0,
            lat: 17.0..50.0,
        };

        let clipped = view.clip(&ring);
        assert!(clipped.len() >= 3);
        assert!(inside(&view, &clipped));
        assert!(clipped.iter().any(|&(x, _)| (x + 66.0).abs() < 1e-9));
    }

    #[test]
    fn svg_has_no_polygons_for_out_of_view_geometry() {
        let geometry = FeatureCollection::from_value(
            "inline",
            json!({"features": [
                {"id": "15001", "geometry": {"type": "Polygon",
                    "coordinates": [[[-155.9, 20.2], [-155.0, 19.3], [-154.8, 19.5], [-155.9, 20.2]]]}}
            ]}),
        )
        .unwrap();

        let map = Choropleth::new(&keys(&["15001"]), &[50], ColorBounds::new(0.0, 200.0))
            .unwrap()
            .with_geometry(geometry, MapView::CONTIGUOUS_US);

        let svg = map.to_svg().unwrap();
        assert!(!svg.contains("<polygon"));
    }
}
