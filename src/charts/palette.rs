//! Colours and the sequential case scale.

use plotters::style::RGBColor;

// Page and chart chrome
pub const PAGE_BACKGROUND: RGBColor = RGBColor(0x38, 0x3e, 0x47);
pub const PANEL_BACKGROUND: RGBColor = RGBColor(0x4e, 0x5d, 0x6c);
pub const CHART_BACKGROUND: RGBColor = RGBColor(0x11, 0x11, 0x11);
pub const LAND: RGBColor = RGBColor(0x25, 0x33, 0x42); // regions with no value
pub const BORDER: RGBColor = RGBColor(0xc7, 0xcd, 0xd4);
pub const GRID: RGBColor = RGBColor(0x28, 0x34, 0x42);
pub const TEXT: RGBColor = RGBColor(0xf2, 0xf5, 0xfa);

/// Trace colours, in trace order.
pub const SERIES: [RGBColor; 4] = [
    RGBColor(0x63, 0x6e, 0xfa), // Blue
    RGBColor(0xef, 0x55, 0x3b), // Red
    RGBColor(0x00, 0xcc, 0x96), // Green
    RGBColor(0xab, 0x63, 0xfa), // Purple
];

/// Light (few cases) to dark (many cases).
pub const CASE_SCALE: [RGBColor; 10] = [
    RGBColor(0xe1, 0xe7, 0xed),
    RGBColor(0xd8, 0xe2, 0xed),
    RGBColor(0xbc, 0xce, 0xe0),
    RGBColor(0xa1, 0xb5, 0xc9),
    RGBColor(0x76, 0x95, 0xb5),
    RGBColor(0x5d, 0x78, 0x94),
    RGBColor(0x40, 0x5e, 0x7d),
    RGBColor(0x2a, 0x4c, 0x6e),
    RGBColor(0x15, 0x3e, 0x66),
    RGBColor(0x02, 0x2a, 0x52),
];

/// `#rrggbb` for use in stylesheets.
pub fn css_hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

pub fn series_color(index: usize) -> RGBColor {
    SERIES[index % SERIES.len()]
}

/// Value range mapped onto the colour scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBounds {
    pub min: f64,
    pub max: f64,
}

impl ColorBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` in [0, 1]; values outside the bounds saturate.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span > 0.0) || value.is_nan() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Piecewise-linear interpolation over evenly spaced colour stops.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [RGBColor],
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(&CASE_SCALE)
    }
}

impl ColorScale {
    pub const fn new(stops: &'static [RGBColor]) -> Self {
        Self { stops }
    }

    /// Colour at position `t` (clamped to [0, 1]).
    pub fn at(&self, t: f64) -> RGBColor {
        match self.stops {
            [] => LAND,
            [only] => *only,
            stops => {
                let pos = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
                let lower = pos.floor() as usize;
                let upper = (lower + 1).min(stops.len() - 1);
                let frac = pos - lower as f64;
                lerp(stops[lower], stops[upper], frac)
            }
        }
    }

    pub fn color_for(&self, value: f64, bounds: ColorBounds) -> RGBColor {
        self.at(bounds.normalize(value))
    }
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hex_matches_page_colours() {
        assert_eq!(css_hex(PAGE_BACKGROUND), "#383e47");
        assert_eq!(css_hex(PANEL_BACKGROUND), "#4e5d6c");
    }

    fn rgb(c: RGBColor) -> (u8, u8, u8) {
        (c.0, c.1, c.2)
    }

    #[test]
    fn scale_endpoints_are_first_and_last_stop() {
        let scale = ColorScale::default();
        assert_eq!(rgb(scale.at(0.0)), rgb(CASE_SCALE[0]));
        assert_eq!(rgb(scale.at(1.0)), rgb(CASE_SCALE[9]));
    }

    #[test]
    fn out_of_range_values_saturate() {
        let scale = ColorScale::default();
        let bounds = ColorBounds::new(0.0, 100_000.0);

        assert_eq!(
            rgb(scale.color_for(150_000.0, bounds)),
            rgb(scale.color_for(100_000.0, bounds))
        );
        assert_eq!(rgb(scale.color_for(-5.0, bounds)), rgb(scale.color_for(0.0, bounds)));
    }

    #[test]
    fn midpoint_interpolates_between_stops() {
        let scale = ColorScale::new(&[RGBColor(0, 0, 0), RGBColor(200, 100, 50)]);
        assert_eq!(rgb(scale.at(0.5)), (100, 50, 25));
    }

    #[test]
    fn degenerate_bounds_map_to_start() {
        let bounds = ColorBounds::new(5.0, 5.0);
        assert_eq!(bounds.normalize(100.0), 0.0);
    }
}
