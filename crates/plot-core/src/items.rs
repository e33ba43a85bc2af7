// File: crates/plot-core/src/items.rs
// Summary: Built-in plot items: curves (lines/spline) and column charts.

use crate::canvas::Pen;
use crate::column::{ColumnRect, ColumnSymbol, Direction};
use crate::geometry::{Point, Rect};
use crate::interval::Interval;
use crate::painter::Painter;
use crate::plot::{LegendEntry, PlotItem};
use crate::scale::ScaleMap;
use crate::spline::{HermiteSpline, NaturalSlopes};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveStyle {
    /// Straight segments between points.
    Lines,
    /// Natural spline through the points, sampled into `samples` vertices.
    Spline { samples: usize },
}

pub struct Curve {
    pub label: String,
    pub pen: Pen,
    pub style: CurveStyle,
    /// Data-space points, ordered along x.
    pub points: Vec<Point>,
}

impl Curve {
    pub fn new(label: impl Into<String>, pen: Pen, points: Vec<Point>) -> Self {
        Self { label: label.into(), pen, style: CurveStyle::Lines, points }
    }

    pub fn with_spline(mut self, samples: usize) -> Self {
        self.style = CurveStyle::Spline { samples };
        self
    }

    fn device_points(&self, xmap: &ScaleMap, ymap: &ScaleMap) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| Point::new(xmap.transform(p.x), ymap.transform(p.y)))
            .collect()
    }
}

impl PlotItem for Curve {
    fn draw(
        &self,
        painter: &mut Painter<'_>,
        xmap: &ScaleMap,
        ymap: &ScaleMap,
        _canvas_rect: &Rect,
    ) {
        if self.points.len() < 2 {
            return;
        }
        let mut device = self.device_points(xmap, ymap);
        painter.set_pen(self.pen);

        match self.style {
            CurveStyle::Lines => painter.draw_polyline(&device),
            CurveStyle::Spline { samples } => {
                // an inverted x axis flips the device order
                if device[0].x > device[device.len() - 1].x {
                    device.reverse();
                }
                let spline = HermiteSpline::new(NaturalSlopes);
                match spline.polygon(&device, samples) {
                    Ok(polygon) => painter.draw_polyline(&polygon),
                    // duplicate or unordered x: fall back to straight segments
                    Err(_) => painter.draw_polyline(&device),
                }
            }
        }
    }

    fn legend_entry(&self) -> Option<LegendEntry> {
        if self.label.is_empty() {
            None
        } else {
            Some(LegendEntry { label: self.label.clone(), color: self.pen.color })
        }
    }

    fn bounds(&self) -> (Interval, Interval) {
        let mut x = Interval::default();
        let mut y = Interval::default();
        for p in &self.points {
            x = x.extended(p.x);
            y = y.extended(p.y);
        }
        (x, y)
    }
}

pub struct Columns {
    pub label: String,
    pub symbol: ColumnSymbol,
    /// (x, value) samples in data space.
    pub samples: Vec<(f64, f64)>,
    pub baseline: f64,
    /// Bar width in data units.
    pub width: f64,
}

impl Columns {
    pub fn new(label: impl Into<String>, symbol: ColumnSymbol, samples: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), symbol, samples, baseline: 0.0, width: 0.5 }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

impl PlotItem for Columns {
    fn draw(
        &self,
        painter: &mut Painter<'_>,
        xmap: &ScaleMap,
        ymap: &ScaleMap,
        _canvas_rect: &Rect,
    ) {
        let half = self.width * 0.5;
        for &(x, value) in &self.samples {
            let x1 = xmap.transform(x - half);
            let x2 = xmap.transform(x + half);
            let y1 = ymap.transform(self.baseline);
            let y2 = ymap.transform(value);
            let direction = if value >= self.baseline {
                Direction::BottomToTop
            } else {
                Direction::TopToBottom
            };
            let column = ColumnRect::new(
                Interval::new(x1, x2).normalized(),
                Interval::new(y1, y2).normalized(),
                direction,
            );
            self.symbol.draw(painter, &column);
        }
    }

    fn legend_entry(&self) -> Option<LegendEntry> {
        if self.label.is_empty() {
            None
        } else {
            Some(LegendEntry { label: self.label.clone(), color: self.symbol.fill })
        }
    }

    fn bounds(&self) -> (Interval, Interval) {
        let half = self.width * 0.5;
        let mut x = Interval::default();
        let mut y = Interval::default();
        for &(sx, value) in &self.samples {
            x = x.extended(sx - half).extended(sx + half);
            y = y.extended(value);
        }
        if !self.samples.is_empty() {
            y = y.extended(self.baseline);
        }
        (x, y)
    }
}
