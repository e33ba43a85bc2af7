// File: crates/plot-core/src/plot.rs
// Summary: Plot model: axes, legend, items and document-level attributes.

use crate::canvas::{Color, FontSpec};
use crate::colormap::LinearColorMap;
use crate::geometry::{Rect, Size};
use crate::interval::Interval;
use crate::painter::Painter;
use crate::scale::{linspace, ScaleMap, Transformation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisId {
    YLeft = 0,
    YRight = 1,
    XTop = 2,
    XBottom = 3,
}

impl AxisId {
    pub const ALL: [AxisId; 4] = [AxisId::YLeft, AxisId::YRight, AxisId::XTop, AxisId::XBottom];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, AxisId::XTop | AxisId::XBottom)
    }
}

/// Color bar attached to a scale, drawn between canvas and backbone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBar {
    pub map: LinearColorMap,
    pub interval: Interval,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisState {
    pub enabled: bool,
    /// Axis title, drawn horizontally at the outer edge of the scale band.
    pub title: String,
    pub interval: Interval,
    pub transformation: Transformation,
    /// Minimum gap between the first/last tick label and the ends of the
    /// scale rect: (start, end).
    pub border_dist: (f64, f64),
    /// Base distance between the scale backbone and the canvas edge.
    pub margin: f64,
    pub tick_count: usize,
    pub tick_length: f64,
    pub font: FontSpec,
    pub color_bar: Option<ColorBar>,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            enabled: false,
            title: String::new(),
            interval: Interval::new(0.0, 1.0),
            transformation: Transformation::Linear,
            border_dist: (0.0, 0.0),
            margin: 4.0,
            tick_count: 6,
            tick_length: 4.0,
            font: FontSpec::points(8.0),
            color_bar: None,
        }
    }
}

impl AxisState {
    /// Major tick positions, evenly spaced in the transformed domain.
    pub fn major_ticks(&self) -> Vec<f64> {
        let n = self.tick_count.max(2);
        let t = self.transformation;
        linspace(t.forward(self.interval.min), t.forward(self.interval.max), n)
            .into_iter()
            .map(|v| t.inverse(v))
            .collect()
    }
}

/// Compact tick label; scientific notation outside a comfortable range.
pub fn format_label(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if a >= 1e6 || a < 1e-4 {
        format!("{v:.3e}")
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// A drawable data item. Items paint themselves through the painter,
/// using the scale maps of the axes they are attached to.
pub trait PlotItem {
    fn draw(&self, painter: &mut Painter<'_>, xmap: &ScaleMap, ymap: &ScaleMap, canvas_rect: &Rect);

    /// Axes this item is attached to: (x, y).
    fn axes(&self) -> (AxisId, AxisId) {
        (AxisId::XBottom, AxisId::YLeft)
    }

    fn legend_entry(&self) -> Option<LegendEntry> {
        None
    }

    /// Data bounds as (x, y) intervals; invalid intervals mean "no data".
    fn bounds(&self) -> (Interval, Interval) {
        (Interval::default(), Interval::default())
    }
}

/// The plot document: everything the renderer reads.
pub struct Plot {
    pub title: String,
    pub title_font: FontSpec,
    pub text_color: Color,
    pub axes: [AxisState; 4],
    pub items: Vec<Box<dyn PlotItem>>,
    pub legend: Vec<LegendEntry>,
    pub legend_position: LegendPosition,
    pub legend_font: FontSpec,
    pub background: Color,
    pub canvas_background: Color,
    /// Outer margin around everything, in logical units.
    pub margin: f64,
    /// Frame width around the widget chrome; only honored by layout when
    /// frames are not ignored.
    pub frame_width: f64,
    /// Gap kept between canvas edge and data when the adjacent axis is
    /// disabled, per axis.
    pub canvas_margins: [f64; 4],
    /// Resolution the plot's logical units were laid out against.
    pub logical_dpi: f64,
    /// Logical size of the plot; a zero size marks an empty document.
    pub size: Size,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl Plot {
    pub fn new() -> Self {
        let mut axes: [AxisState; 4] = Default::default();
        axes[AxisId::XBottom.index()].enabled = true;
        axes[AxisId::YLeft.index()].enabled = true;
        Self {
            title: String::new(),
            title_font: FontSpec::points(12.0),
            text_color: Color::BLACK,
            axes,
            items: Vec::new(),
            legend: Vec::new(),
            legend_position: LegendPosition::default(),
            legend_font: FontSpec::points(8.0),
            background: Color::WHITE,
            canvas_background: Color::WHITE,
            margin: 0.0,
            frame_width: 0.0,
            canvas_margins: [4.0; 4],
            logical_dpi: 96.0,
            size: Size::new(640.0, 480.0),
        }
    }

    pub fn axis(&self, id: AxisId) -> &AxisState {
        &self.axes[id.index()]
    }

    pub fn axis_mut(&mut self, id: AxisId) -> &mut AxisState {
        &mut self.axes[id.index()]
    }

    /// Add an item; items that announce a legend entry get one appended.
    pub fn insert_item(&mut self, item: Box<dyn PlotItem>) {
        if let Some(entry) = item.legend_entry() {
            self.legend.push(entry);
        }
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Fit the axis intervals to the bounds of the attached items.
    /// `margin` is the fraction of the spanned width added on both ends.
    pub fn autoscale_axes(&mut self, margin: f64) {
        let mut bounds = [Interval::default(); 4];
        for item in &self.items {
            let (x, y) = item.bounds();
            let (x_axis, y_axis) = item.axes();
            bounds[x_axis.index()] = bounds[x_axis.index()].united(&x);
            bounds[y_axis.index()] = bounds[y_axis.index()].united(&y);
        }
        for id in AxisId::ALL {
            let mut b = bounds[id.index()];
            if !b.is_valid() {
                continue;
            }
            if b.width() == 0.0 {
                // a single value cannot span a scale
                b = Interval::new(b.min - 0.5, b.max + 0.5);
            }
            let pad = b.width() * margin.max(0.0);
            self.axes[id.index()].interval = Interval::new(b.min - pad, b.max + pad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_axes() {
        let plot = Plot::new();
        assert!(plot.axis(AxisId::XBottom).enabled);
        assert!(plot.axis(AxisId::YLeft).enabled);
        assert!(!plot.axis(AxisId::XTop).enabled);
        assert!(!plot.axis(AxisId::YRight).enabled);
    }

    #[test]
    fn linear_ticks_are_even() {
        let axis = AxisState {
            enabled: true,
            interval: Interval::new(0.0, 10.0),
            tick_count: 6,
            ..Default::default()
        };
        let ticks = axis.major_ticks();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[5], 10.0);
        assert!((ticks[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn log_ticks_follow_decades() {
        let axis = AxisState {
            enabled: true,
            interval: Interval::new(1.0, 1000.0),
            transformation: Transformation::Log10,
            tick_count: 4,
            ..Default::default()
        };
        let ticks = axis.major_ticks();
        assert_eq!(ticks.len(), 4);
        assert!((ticks[0] - 1.0).abs() < 1e-9);
        assert!((ticks[1] - 10.0).abs() < 1e-6);
        assert!((ticks[3] - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn label_formatting() {
        assert_eq!(format_label(0.0), "0");
        assert_eq!(format_label(2.5), "2.5");
        assert_eq!(format_label(10.0), "10");
        assert_eq!(format_label(2_000_000.0), "2.000e6");
    }
}
