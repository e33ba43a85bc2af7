// File: crates/plot-core/src/column.rs
// Summary: Directed column rectangle and the box column symbol.

use crate::canvas::{Color, Pen};
use crate::geometry::{Orientation, Point, Rect};
use crate::interval::Interval;
use crate::painter::Painter;

/// Direction a column grows in, from base edge to tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    BottomToTop,
    TopToBottom,
}

/// Directed rectangle: bounding intervals plus the grow direction of
/// the column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnRect {
    pub h_interval: Interval,
    pub v_interval: Interval,
    pub direction: Direction,
}

impl Default for ColumnRect {
    fn default() -> Self {
        Self {
            h_interval: Interval::default(),
            v_interval: Interval::default(),
            direction: Direction::BottomToTop,
        }
    }
}

impl ColumnRect {
    pub fn new(h_interval: Interval, v_interval: Interval, direction: Direction) -> Self {
        Self { h_interval, v_interval, direction }
    }

    /// Normalized bounding rect; never has negative extents, regardless
    /// of direction or interval order.
    pub fn to_rect(&self) -> Rect {
        let h = self.h_interval.normalized();
        let v = self.v_interval.normalized();
        Rect::from_ltrb(h.min, v.min, h.max, v.max)
    }

    pub fn orientation(&self) -> Orientation {
        match self.direction {
            Direction::LeftToRight | Direction::RightToLeft => Orientation::Horizontal,
            Direction::BottomToTop | Direction::TopToBottom => Orientation::Vertical,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStyle {
    NoFrame,
    Plain,
    Raised,
}

/// Closed set of column styles; each knows how to draw itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnStyle {
    Box { frame: FrameStyle, line_width: f64 },
}

/// Drawing primitive for bars/columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSymbol {
    pub style: ColumnStyle,
    pub fill: Color,
    pub frame_color: Color,
}

impl ColumnSymbol {
    pub fn new(fill: Color) -> Self {
        Self {
            style: ColumnStyle::Box { frame: FrameStyle::Plain, line_width: 1.0 },
            fill,
            frame_color: Color::BLACK,
        }
    }

    pub fn draw(&self, painter: &mut Painter<'_>, column: &ColumnRect) {
        match self.style {
            ColumnStyle::Box { frame, line_width } => {
                self.draw_box(painter, column, frame, line_width)
            }
        }
    }

    fn draw_box(
        &self,
        painter: &mut Painter<'_>,
        column: &ColumnRect,
        frame: FrameStyle,
        line_width: f64,
    ) {
        let r = column.to_rect();
        if !r.is_valid() {
            return;
        }
        painter.fill_rect(r, self.fill);

        match frame {
            FrameStyle::NoFrame => {}
            FrameStyle::Plain => painter.with_saved(|p| {
                p.set_brush(None);
                p.set_pen(Pen::new(self.frame_color, line_width));
                p.draw_polyline(&crate::geometry::rect_outline(r));
            }),
            FrameStyle::Raised => self.draw_raised_frame(painter, column, r, line_width),
        }
    }

    // Shaded frame: the tip and one side get the light edge, the base
    // and the other side the dark one, so bars read as raised towards
    // their grow direction.
    fn draw_raised_frame(
        &self,
        painter: &mut Painter<'_>,
        column: &ColumnRect,
        r: Rect,
        line_width: f64,
    ) {
        let light = self.fill.lightened(0.45);
        let dark = self.fill.darkened(0.45);

        let top = [Point::new(r.left, r.top), Point::new(r.right, r.top)];
        let bottom = [Point::new(r.left, r.bottom), Point::new(r.right, r.bottom)];
        let left = [Point::new(r.left, r.top), Point::new(r.left, r.bottom)];
        let right = [Point::new(r.right, r.top), Point::new(r.right, r.bottom)];

        let (light_edges, dark_edges) = match column.direction {
            Direction::BottomToTop => ([top, left], [bottom, right]),
            Direction::TopToBottom => ([bottom, left], [top, right]),
            Direction::LeftToRight => ([right, top], [left, bottom]),
            Direction::RightToLeft => ([left, top], [right, bottom]),
        };

        painter.with_saved(|p| {
            p.set_pen(Pen::new(light, line_width));
            for edge in light_edges {
                p.draw_line(edge[0], edge[1]);
            }
            p.set_pen(Pen::new(dark, line_width));
            for edge in dark_edges {
                p.draw_line(edge[0], edge[1]);
            }
        });
    }
}
