// File: crates/plot-core/src/painter.rs
// Summary: Clip-aware wrapper around Canvas primitives with backend
//          workarounds (polyline chunking, window-clipped fills, font
//          unscaling around text).

use crate::canvas::{Canvas, Color, FontSpec, ImageRef, PaintEnv, Pen, TextAlign};
use crate::colormap::LinearColorMap;
use crate::geometry::{clip_polygon, rect_outline, Orientation, Point, Rect};
use crate::interval::Interval;
use crate::scale::ScaleMap;

// Chunk length for split polylines: 20 new points plus the shared
// boundary point of the previous chunk.
const POLYLINE_SPLIT: usize = 20;

pub struct Painter<'a> {
    canvas: &'a mut dyn Canvas,
    env: &'a PaintEnv,
}

impl<'a> Painter<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, env: &'a PaintEnv) -> Self {
        Self { canvas, env }
    }

    pub fn canvas(&mut self) -> &mut dyn Canvas {
        self.canvas
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.canvas.set_pen(pen);
    }

    pub fn set_brush(&mut self, brush: Option<Color>) {
        self.canvas.set_brush(brush);
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.canvas.set_font(font);
    }

    pub fn set_clip(&mut self, rect: Option<Rect>) {
        self.canvas.set_clip(rect);
    }

    /// Run `f` between a save/restore pair; the restore happens on every
    /// exit path out of `f`.
    pub fn with_saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.canvas.save();
        let result = f(self);
        self.canvas.restore();
        result
    }

    // Clip rect to apply by hand, for backends that ignore native clipping.
    fn device_clip(&self) -> Option<Rect> {
        if self.canvas.clips_natively() {
            None
        } else {
            self.canvas.clip()
        }
    }

    pub fn draw_line(&mut self, p1: Point, p2: Point) {
        if let Some(clip) = self.device_clip() {
            if !(clip.contains(p1) && clip.contains(p2)) {
                self.draw_polyline(&[p1, p2]);
                return;
            }
        }
        self.canvas.draw_line(p1, p2);
    }

    pub fn draw_polyline(&mut self, points: &[Point]) {
        let clipped: Option<Vec<Point>> =
            self.device_clip().map(|clip| clip_polygon(&clip, points, false));
        let points: &[Point] = clipped.as_deref().unwrap_or(points);
        if points.len() < 2 {
            return;
        }

        if self.env.polyline_splitting && self.canvas.wants_polyline_chunks() {
            let mut i = 0;
            while i < points.len() {
                let n = (POLYLINE_SPLIT + 1).min(points.len() - i);
                if n >= 2 {
                    self.canvas.draw_polyline(&points[i..i + n]);
                }
                i += POLYLINE_SPLIT;
            }
        } else {
            self.canvas.draw_polyline(points);
        }
    }

    pub fn draw_polygon(&mut self, points: &[Point]) {
        let clipped: Option<Vec<Point>> =
            self.device_clip().map(|clip| clip_polygon(&clip, points, true));
        let points: &[Point] = clipped.as_deref().unwrap_or(points);
        if points.len() < 3 {
            return;
        }
        self.canvas.draw_polygon(points);
    }

    pub fn draw_rect(&mut self, rect: Rect) {
        if let Some(clip) = self.device_clip() {
            if !clip.intersects(&rect) {
                return;
            }
            if !clip.contains_rect(&rect) {
                // fill the visible part, stroke the full outline clipped
                if let Some(brush) = self.canvas.brush() {
                    self.fill_rect(rect.intersected(&clip), brush);
                }
                self.with_saved(|p| {
                    p.canvas.set_brush(None);
                    p.draw_polyline(&rect_outline(rect));
                });
                return;
            }
        }
        self.canvas.draw_rect(rect);
    }

    /// Fill, pre-intersected against the logical window (and the clip on
    /// backends without native clipping). Very large rects outside the
    /// visible area are dropped instead of being handed to the backend.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_valid() {
            return;
        }
        let mut clip = self.canvas.window();
        if let Some(device_clip) = self.device_clip() {
            clip = clip.intersected(&device_clip);
        }
        let r = rect.intersected(&clip);
        if r.is_valid() {
            self.canvas.fill_rect(r, color);
        }
    }

    pub fn draw_ellipse(&mut self, rect: Rect) {
        if let Some(clip) = self.device_clip() {
            if !clip.contains_rect(&rect) {
                return;
            }
        }
        self.canvas.draw_ellipse(rect);
    }

    pub fn draw_pie(&mut self, rect: Rect, start_deg: f64, span_deg: f64) {
        if let Some(clip) = self.device_clip() {
            if !clip.contains_rect(&rect) {
                return;
            }
        }
        self.canvas.draw_pie(rect, start_deg, span_deg);
    }

    pub fn draw_point(&mut self, p: Point) {
        if let Some(clip) = self.device_clip() {
            if !clip.contains(p) {
                return;
            }
        }
        self.canvas.draw_point(p);
    }

    pub fn draw_text(&mut self, pos: Point, text: &str) {
        if let Some(clip) = self.device_clip() {
            if !clip.contains(pos) {
                return;
            }
        }
        self.with_saved(|p| {
            p.unscale_font();
            p.canvas.draw_text(pos, text);
        });
    }

    pub fn draw_text_rect(&mut self, rect: Rect, align: TextAlign, text: &str) {
        self.with_saved(|p| {
            p.unscale_font();
            p.canvas.draw_text_rect(rect, align, text);
        });
    }

    // Point-sized fonts resolve against the surface DPI. When that DPI
    // differs from the reference the glyphs would change size relative to
    // the layout, so pin the pixel size computed at the reference DPI and
    // let the world transform scale it.
    fn unscale_font(&mut self) {
        let font = self.canvas.font();
        if font.pixel_size.is_some() {
            return;
        }
        if (self.canvas.logical_dpi() - self.env.reference_dpi).abs() > 0.5 {
            self.canvas.set_font(FontSpec {
                pixel_size: Some(font.resolve_px(self.env.reference_dpi)),
                ..font
            });
        }
    }

    pub fn draw_image(&mut self, rect: Rect, image: ImageRef<'_>) {
        if let Some(clip) = self.device_clip() {
            if !clip.intersects(&rect) {
                return;
            }
        }
        self.canvas.draw_image(rect, image);
    }

    /// Paint a color gradient strip, one line per device pixel, resolving
    /// each position back to a value through the scale map.
    pub fn draw_color_bar(
        &mut self,
        color_map: &LinearColorMap,
        interval: Interval,
        map: &ScaleMap,
        orientation: Orientation,
        rect: Rect,
    ) {
        if !rect.is_valid() {
            return;
        }
        let mut map = *map;
        self.with_saved(|p| match orientation {
            Orientation::Horizontal => {
                map.set_paint_interval(rect.left, rect.right);
                let mut x = rect.left.ceil();
                while x <= rect.right {
                    let value = map.inv_transform(x);
                    p.canvas.set_pen(Pen::new(color_map.color(interval, value), 1.0));
                    p.canvas.draw_line(Point::new(x, rect.top), Point::new(x, rect.bottom));
                    x += 1.0;
                }
            }
            Orientation::Vertical => {
                map.set_paint_interval(rect.bottom, rect.top);
                let mut y = rect.top.ceil();
                while y <= rect.bottom {
                    let value = map.inv_transform(y);
                    p.canvas.set_pen(Pen::new(color_map.color(interval, value), 1.0));
                    p.canvas.draw_line(Point::new(rect.left, y), Point::new(rect.right, y));
                    y += 1.0;
                }
            }
        });
    }
}
