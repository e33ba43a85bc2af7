// File: crates/plot-core/tests/common/mod.rs
// Purpose: Recording canvas used by the integration tests.

use plot_core::{Canvas, Color, FontSpec, ImageRef, Pen, Point, Rect, Size, TextAlign};

/// One recorded draw call, with enough detail for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line(Point, Point),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    Rect(Rect),
    FillRect(Rect, Color),
    Ellipse(Rect),
    Pie(Rect, f64, f64),
    Dot(Point),
    Text(Point, String),
    TextRect(Rect, TextAlign, String),
    Image(Rect),
    Save,
    Restore,
    Scale(f64, f64),
    Clip(Option<Rect>),
}

#[derive(Clone)]
struct State {
    pen: Pen,
    brush: Option<Color>,
    font: FontSpec,
    clip: Option<Rect>,
    scale: (f64, f64),
}

impl Default for State {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            brush: None,
            font: FontSpec::default(),
            clip: None,
            scale: (1.0, 1.0),
        }
    }
}

/// Canvas that records every call instead of producing pixels. Text
/// metrics are deterministic: 0.6 px advance per char, 1.2 px line
/// height, both relative to the resolved pixel size.
pub struct RecordingCanvas {
    pub size: Size,
    pub dpi: f64,
    pub native_clipping: bool,
    pub chunked_polylines: bool,
    pub ops: Vec<DrawOp>,
    /// Pen color at each `DrawOp::Line`, in draw order.
    pub line_colors: Vec<Color>,
    state: State,
    stack: Vec<State>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            dpi: 96.0,
            native_clipping: true,
            chunked_polylines: false,
            ops: Vec::new(),
            line_colors: Vec::new(),
            state: State::default(),
            stack: Vec::new(),
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn without_native_clipping(mut self) -> Self {
        self.native_clipping = false;
        self
    }

    pub fn with_chunked_polylines(mut self) -> Self {
        self.chunked_polylines = true;
        self
    }

    pub fn polylines(&self) -> Vec<&Vec<Point>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polyline(pts) => Some(pts),
                _ => None,
            })
            .collect()
    }

    pub fn fill_rects(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(r, c) => Some((*r, *c)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line(a, b) => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn colored_lines(&self) -> Vec<(Color, Point, Point)> {
        self.lines()
            .into_iter()
            .zip(&self.line_colors)
            .map(|((a, b), c)| (*c, a, b))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(_, s) | DrawOp::TextRect(_, _, s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn device_size(&self) -> Size {
        self.size
    }

    fn logical_dpi(&self) -> f64 {
        self.dpi
    }

    fn window(&self) -> Rect {
        let (sx, sy) = self.state.scale;
        Rect::from_ltwh(0.0, 0.0, self.size.width / sx, self.size.height / sy)
    }

    fn clips_natively(&self) -> bool {
        self.native_clipping
    }

    fn wants_polyline_chunks(&self) -> bool {
        self.chunked_polylines
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale.0 *= sx;
        self.state.scale.1 *= sy;
        self.ops.push(DrawOp::Scale(sx, sy));
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        self.state.clip = rect;
        self.ops.push(DrawOp::Clip(rect));
    }

    fn clip(&self) -> Option<Rect> {
        self.state.clip
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state.pen = pen;
    }

    fn pen(&self) -> Pen {
        self.state.pen
    }

    fn set_brush(&mut self, brush: Option<Color>) {
        self.state.brush = brush;
    }

    fn brush(&self) -> Option<Color> {
        self.state.brush
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    fn font(&self) -> FontSpec {
        self.state.font
    }

    fn draw_line(&mut self, p1: Point, p2: Point) {
        self.line_colors.push(self.state.pen.color);
        self.ops.push(DrawOp::Line(p1, p2));
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.ops.push(DrawOp::Polyline(points.to_vec()));
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.ops.push(DrawOp::Polygon(points.to_vec()));
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Rect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Ellipse(rect));
    }

    fn draw_pie(&mut self, rect: Rect, start_deg: f64, span_deg: f64) {
        self.ops.push(DrawOp::Pie(rect, start_deg, span_deg));
    }

    fn draw_point(&mut self, p: Point) {
        self.ops.push(DrawOp::Dot(p));
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        self.ops.push(DrawOp::Text(pos, text.to_string()));
    }

    fn draw_text_rect(&mut self, rect: Rect, align: TextAlign, text: &str) {
        self.ops.push(DrawOp::TextRect(rect, align, text.to_string()));
    }

    fn text_extent(&self, text: &str, font: &FontSpec) -> Size {
        let px = font.resolve_px(self.dpi);
        Size::new(0.6 * px * text.chars().count() as f64, 1.2 * px)
    }

    fn draw_image(&mut self, rect: Rect, _image: ImageRef<'_>) {
        self.ops.push(DrawOp::Image(rect));
    }
}
