// File: crates/plot-core/src/colormap.rs
// Summary: Linear two-color map for color bars and value-colored items.

use crate::canvas::Color;
use crate::interval::Interval;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearColorMap {
    pub from: Color,
    pub to: Color,
}

impl LinearColorMap {
    pub const fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }

    /// Color for `value` within `interval`; values outside are clamped to
    /// the endpoints.
    pub fn color(&self, interval: Interval, value: f64) -> Color {
        let interval = interval.normalized();
        let width = interval.width();
        if width <= 0.0 {
            return self.from;
        }
        self.from.lerp(self.to, (value - interval.min) / width)
    }
}
