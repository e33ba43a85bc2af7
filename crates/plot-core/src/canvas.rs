// File: crates/plot-core/src/canvas.rs
// Summary: Paint-surface abstraction: colors, pens, fonts and the Canvas trait
//          every backend implements.

use crate::geometry::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn lightened(self, amount: f64) -> Color {
        self.lerp(Color::rgba(255, 255, 255, self.a), amount)
    }

    pub fn darkened(self, amount: f64) -> Color {
        self.lerp(Color::rgba(0, 0, 0, self.a), amount)
    }
}

/// Stroke style. A width of zero (or a fully transparent color) means
/// "no stroke"; backends skip such outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
}

impl Pen {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub const fn none() -> Self {
        Self { color: Color::TRANSPARENT, width: 0.0 }
    }

    pub fn is_none(&self) -> bool {
        self.width <= 0.0 || self.color.a == 0
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self { color: Color::BLACK, width: 1.0 }
    }
}

/// Font request. `point_size` is resolution independent; when
/// `pixel_size` is set it pins the concrete size and the backend must not
/// consult its DPI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub point_size: f64,
    pub pixel_size: Option<f64>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { point_size: 10.0, pixel_size: None }
    }
}

impl FontSpec {
    pub const fn points(point_size: f64) -> Self {
        Self { point_size, pixel_size: None }
    }

    /// Concrete pixel size at the given DPI.
    pub fn resolve_px(&self, dpi: f64) -> f64 {
        self.pixel_size.unwrap_or(self.point_size * dpi / 72.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Borrowed RGBA8 image data for blitting.
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

/// Process-wide paint configuration, created once and passed by reference.
#[derive(Clone, Copy, Debug)]
pub struct PaintEnv {
    /// Split long polylines into fixed-size chunks on backends that ask
    /// for it. Purely a performance workaround; never changes the output.
    pub polyline_splitting: bool,
    /// DPI fonts were sized against; used to pin point-sized fonts when
    /// painting onto a surface with a different resolution.
    pub reference_dpi: f64,
}

impl Default for PaintEnv {
    fn default() -> Self {
        Self { polyline_splitting: true, reference_dpi: 96.0 }
    }
}

/// Primitive paint surface.
///
/// Coordinates are logical; `scale` multiplies them towards device pixels.
/// `save`/`restore` span pen, brush, font, clip and transform. `draw_text`
/// positions the top-left corner of the text box.
pub trait Canvas {
    fn device_size(&self) -> Size;
    fn logical_dpi(&self) -> f64;

    /// Current logical window: the device rect seen through the transform.
    fn window(&self) -> Rect;

    /// Whether the backend honors `set_clip` natively. Backends that do
    /// not get their shapes pre-clipped by the painter.
    fn clips_natively(&self) -> bool {
        true
    }

    /// Whether long polylines should be split into small chunks
    /// (rasterizers with superlinear polyline cost).
    fn wants_polyline_chunks(&self) -> bool {
        false
    }

    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, sx: f64, sy: f64);

    fn set_clip(&mut self, rect: Option<Rect>);
    fn clip(&self) -> Option<Rect>;

    fn set_pen(&mut self, pen: Pen);
    fn pen(&self) -> Pen;
    fn set_brush(&mut self, brush: Option<Color>);
    fn brush(&self) -> Option<Color>;
    fn set_font(&mut self, font: FontSpec);
    fn font(&self) -> FontSpec;

    fn draw_line(&mut self, p1: Point, p2: Point);
    fn draw_polyline(&mut self, points: &[Point]);
    fn draw_polygon(&mut self, points: &[Point]);
    fn draw_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_ellipse(&mut self, rect: Rect);
    fn draw_pie(&mut self, rect: Rect, start_deg: f64, span_deg: f64);
    fn draw_point(&mut self, p: Point);
    fn draw_text(&mut self, pos: Point, text: &str);
    fn draw_text_rect(&mut self, rect: Rect, align: TextAlign, text: &str);
    fn text_extent(&self, text: &str, font: &FontSpec) -> Size;
    fn draw_image(&mut self, rect: Rect, image: ImageRef<'_>);
}
