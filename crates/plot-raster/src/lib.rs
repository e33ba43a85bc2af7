// File: crates/plot-raster/src/lib.rs
// Summary: Pure-software Canvas backend: draws into an RGBA image buffer,
//          shapes text with ab_glyph and exports PNG.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use log::warn;

use plot_core::{
    Canvas, Color, FontSpec, ImageRef, Pen, Point, Rect, Size, TextAlign,
};

// Candidate system fonts, checked in order. ab_glyph does not discover
// OS fonts on its own.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Clone)]
struct State {
    pen: Pen,
    brush: Option<Color>,
    font: FontSpec,
    clip: Option<Rect>,
    sx: f64,
    sy: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            brush: None,
            font: FontSpec::default(),
            clip: None,
            sx: 1.0,
            sy: 1.0,
        }
    }
}

/// Canvas drawing into an owned RGBA buffer.
///
/// Coordinates are logical; the current transform maps them to pixels.
/// Pixels are written with source-over alpha blending.
pub struct RasterCanvas {
    img: RgbaImage,
    dpi: f64,
    font_data: Option<FontVec>,
    state: State,
    stack: Vec<State>,
}

impl RasterCanvas {
    /// White canvas of the given pixel size at 96 DPI.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let img = RgbaImage::from_pixel(
            width.max(1),
            height.max(1),
            Rgba([background.r, background.g, background.b, background.a]),
        );
        let font_data = load_system_font();
        if font_data.is_none() {
            warn!("no usable system font found, text output disabled");
        }
        Self { img, dpi: 96.0, font_data, state: State::default(), stack: Vec::new() }
    }

    pub fn set_dpi(&mut self, dpi: f64) {
        if dpi > 0.0 {
            self.dpi = dpi;
        }
    }

    /// Use the given TTF/OTF data instead of the discovered system font.
    pub fn set_font_data(&mut self, data: Vec<u8>) -> Result<()> {
        self.font_data = Some(FontVec::try_from_vec(data).context("parsing font data")?);
        Ok(())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.img.save(path).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.img
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encoding PNG")?;
        Ok(out)
    }

    // logical -> device
    fn dev(&self, p: Point) -> (f64, f64) {
        (p.x * self.state.sx, p.y * self.state.sy)
    }

    fn dev_rect(&self, r: Rect) -> Rect {
        Rect::from_ltrb(
            r.left * self.state.sx,
            r.top * self.state.sy,
            r.right * self.state.sx,
            r.bottom * self.state.sy,
        )
    }

    fn dev_clip(&self) -> Option<Rect> {
        self.state.clip.map(|c| self.dev_rect(c))
    }

    fn pen_px(&self) -> f64 {
        (self.state.pen.width * 0.5 * (self.state.sx + self.state.sy)).max(1.0)
    }

    fn stroke_segment(&mut self, a: Point, b: Point) {
        if self.state.pen.is_none() {
            return;
        }
        let (x0, y0) = self.dev(a);
        let (x1, y1) = self.dev(b);
        let color = self.state.pen.color;
        let half = self.pen_px() * 0.5;
        let clip = self.dev_clip();

        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            stamp(&mut self.img, clip.as_ref(), x, y, half, color);
        }
    }

    fn fill_dev_rect(&mut self, r: Rect, color: Color) {
        let mut r = r;
        if let Some(clip) = self.dev_clip() {
            r = r.intersected(&clip);
        }
        if !r.is_valid() {
            return;
        }
        let x0 = r.left.floor().max(0.0) as u32;
        let y0 = r.top.floor().max(0.0) as u32;
        let x1 = (r.right.ceil() as i64).clamp(0, self.img.width() as i64) as u32;
        let y1 = (r.bottom.ceil() as i64).clamp(0, self.img.height() as i64) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                blend(&mut self.img, x as i64, y as i64, None, color, 1.0);
            }
        }
    }

    // Even-odd scanline fill over device coordinates.
    fn fill_dev_polygon(&mut self, pts: &[(f64, f64)], color: Color) {
        if pts.len() < 3 {
            return;
        }
        let clip = self.dev_clip();
        let y_min = pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor().max(0.0) as i64;
        let y_max = pts
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.img.height() as f64) as i64;

        let mut crossings: Vec<f64> = Vec::new();
        for y in y_min..y_max {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for i in 0..pts.len() {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % pts.len()];
                if (y0 <= yc && yc < y1) || (y1 <= yc && yc < y0) {
                    crossings.push(x0 + (yc - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x0 = pair[0].round().max(0.0) as i64;
                let x1 = pair[1].round().min(self.img.width() as f64) as i64;
                for x in x0..x1 {
                    blend(&mut self.img, x, y, clip.as_ref(), color, 1.0);
                }
            }
        }
    }

    fn glyph_run(&mut self, x: f64, baseline: f64, px: f32, text: &str) {
        let Some(font) = &self.font_data else {
            return;
        };
        let color = self.state.pen.color;
        let clip = self.dev_clip();
        let img = &mut self.img;

        let scaled = font.as_scaled(PxScale::from(px));
        let mut cursor = x as f32;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            let glyph = id.with_scale_and_position(PxScale::from(px), point(cursor, baseline as f32));
            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, cov| {
                    let px_x = bounds.min.x as i64 + gx as i64;
                    let px_y = bounds.min.y as i64 + gy as i64;
                    blend(img, px_x, px_y, clip.as_ref(), color, cov as f64);
                });
            }
            cursor += scaled.h_advance(id);
        }
    }

    fn font_px(&self) -> f64 {
        self.state.font.resolve_px(self.dpi) * self.state.sy
    }
}

impl Canvas for RasterCanvas {
    fn device_size(&self) -> Size {
        Size::new(self.img.width() as f64, self.img.height() as f64)
    }

    fn logical_dpi(&self) -> f64 {
        self.dpi
    }

    fn window(&self) -> Rect {
        Rect::from_ltwh(
            0.0,
            0.0,
            self.img.width() as f64 / self.state.sx,
            self.img.height() as f64 / self.state.sy,
        )
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.sx *= sx;
        self.state.sy *= sy;
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        self.state.clip = rect;
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
        self.stroke_segment(p1, p2);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        for w in points.windows(2) {
            self.stroke_segment(w[0], w[1]);
        }
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        if let Some(brush) = self.state.brush {
            let dev: Vec<(f64, f64)> = points.iter().map(|p| self.dev(*p)).collect();
            self.fill_dev_polygon(&dev, brush);
        }
        if !self.state.pen.is_none() && points.len() >= 2 {
            for w in points.windows(2) {
                self.stroke_segment(w[0], w[1]);
            }
            let last = points[points.len() - 1];
            if last != points[0] {
                self.stroke_segment(last, points[0]);
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect) {
        if let Some(brush) = self.state.brush {
            self.fill_rect(rect, brush);
        }
        if !self.state.pen.is_none() {
            let outline = plot_core::geometry::rect_outline(rect);
            for w in outline.windows(2) {
                self.stroke_segment(w[0], w[1]);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = self.dev_rect(rect);
        self.fill_dev_rect(r, color);
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        let r = self.dev_rect(rect);
        if !r.is_valid() {
            return;
        }
        let cx = (r.left + r.right) * 0.5;
        let cy = (r.top + r.bottom) * 0.5;
        let a = r.width() * 0.5;
        let b = r.height() * 0.5;

        if let Some(brush) = self.state.brush {
            let clip = self.dev_clip();
            let y0 = r.top.floor().max(0.0) as i64;
            let y1 = r.bottom.ceil().min(self.img.height() as f64) as i64;
            for y in y0..y1 {
                let dy = (y as f64 + 0.5 - cy) / b;
                if dy.abs() > 1.0 {
                    continue;
                }
                let dx = a * (1.0 - dy * dy).sqrt();
                let x0 = (cx - dx).round().max(0.0) as i64;
                let x1 = (cx + dx).round().min(self.img.width() as f64) as i64;
                for x in x0..x1 {
                    blend(&mut self.img, x, y, clip.as_ref(), brush, 1.0);
                }
            }
        }
        if !self.state.pen.is_none() {
            let color = self.state.pen.color;
            let half = self.pen_px() * 0.5;
            let clip = self.dev_clip();
            let steps = ((a + b) * 4.0).ceil().max(16.0) as usize;
            for i in 0..steps {
                let t = i as f64 / steps as f64 * std::f64::consts::TAU;
                stamp(
                    &mut self.img,
                    clip.as_ref(),
                    cx + a * t.cos(),
                    cy + b * t.sin(),
                    half,
                    color,
                );
            }
        }
    }

    fn draw_pie(&mut self, rect: Rect, start_deg: f64, span_deg: f64) {
        let r = self.dev_rect(rect);
        if !r.is_valid() || span_deg == 0.0 {
            return;
        }
        let Some(brush) = self.state.brush else {
            return;
        };
        let cx = (r.left + r.right) * 0.5;
        let cy = (r.top + r.bottom) * 0.5;
        let a = r.width() * 0.5;
        let b = r.height() * 0.5;
        let clip = self.dev_clip();

        let (start, span) =
            if span_deg < 0.0 { (start_deg + span_deg, -span_deg) } else { (start_deg, span_deg) };

        let y0 = r.top.floor().max(0.0) as i64;
        let y1 = r.bottom.ceil().min(self.img.height() as f64) as i64;
        let x0 = r.left.floor().max(0.0) as i64;
        let x1 = r.right.ceil().min(self.img.width() as f64) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f64 + 0.5 - cx) / a;
                // screen y grows downwards, angles counter-clockwise
                let dy = (cy - (y as f64 + 0.5)) / b;
                if dx * dx + dy * dy > 1.0 {
                    continue;
                }
                let mut ang = dy.atan2(dx).to_degrees();
                ang = (ang - start).rem_euclid(360.0);
                if ang <= span {
                    blend(&mut self.img, x, y, clip.as_ref(), brush, 1.0);
                }
            }
        }
    }

    fn draw_point(&mut self, p: Point) {
        if self.state.pen.is_none() {
            return;
        }
        let (x, y) = self.dev(p);
        let color = self.state.pen.color;
        let half = self.pen_px() * 0.5;
        let clip = self.dev_clip();
        stamp(&mut self.img, clip.as_ref(), x, y, half, color);
    }

    fn draw_text(&mut self, pos: Point, text: &str) {
        let px = self.font_px() as f32;
        let (x, y) = self.dev(pos);
        let ascent = if let Some(font) = &self.font_data {
            font.as_scaled(PxScale::from(px)).ascent() as f64
        } else {
            px as f64 * 0.8
        };
        self.glyph_run(x, y + ascent, px, text);
    }

    fn draw_text_rect(&mut self, rect: Rect, align: TextAlign, text: &str) {
        let font = self.state.font;
        let extent = self.text_extent(text, &font);
        let x = match align {
            TextAlign::Left => rect.left,
            TextAlign::Center => rect.left + (rect.width() - extent.width) * 0.5,
            TextAlign::Right => rect.right - extent.width,
        };
        let y = rect.top + (rect.height() - extent.height) * 0.5;
        self.draw_text(Point::new(x, y), text);
    }

    fn text_extent(&self, text: &str, font: &FontSpec) -> Size {
        let px = font.resolve_px(self.dpi);
        match &self.font_data {
            Some(data) => {
                let scaled = data.as_scaled(PxScale::from(px as f32));
                let width: f32 =
                    text.chars().map(|ch| scaled.h_advance(scaled.glyph_id(ch))).sum();
                Size::new(width as f64, (scaled.ascent() - scaled.descent()) as f64)
            }
            // analytic fallback, keeps layout deterministic without fonts
            None => Size::new(0.6 * px * text.chars().count() as f64, 1.2 * px),
        }
    }

    fn draw_image(&mut self, rect: Rect, image: ImageRef<'_>) {
        let r = self.dev_rect(rect);
        if !r.is_valid() || image.width == 0 || image.height == 0 {
            return;
        }
        let clip = self.dev_clip();
        let y0 = r.top.floor().max(0.0) as i64;
        let y1 = r.bottom.ceil().min(self.img.height() as f64) as i64;
        let x0 = r.left.floor().max(0.0) as i64;
        let x1 = r.right.ceil().min(self.img.width() as f64) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                // nearest neighbor sample
                let u = ((x as f64 + 0.5 - r.left) / r.width() * image.width as f64) as u32;
                let v = ((y as f64 + 0.5 - r.top) / r.height() * image.height as f64) as u32;
                let u = u.min(image.width - 1) as usize;
                let v = v.min(image.height - 1) as usize;
                let idx = (v * image.width as usize + u) * 4;
                let src = &image.rgba[idx..idx + 4];
                let color = Color::rgba(src[0], src[1], src[2], src[3]);
                blend(&mut self.img, x, y, clip.as_ref(), color, 1.0);
            }
        }
    }
}

// Square stamp of the pen footprint, clipped.
fn stamp(img: &mut RgbaImage, clip: Option<&Rect>, x: f64, y: f64, half: f64, color: Color) {
    let x0 = (x - half).round() as i64;
    let x1 = ((x + half).round() as i64).max(x0 + 1);
    let y0 = (y - half).round() as i64;
    let y1 = ((y + half).round() as i64).max(y0 + 1);
    for py in y0..y1 {
        for px in x0..x1 {
            blend(img, px, py, clip, color, 1.0);
        }
    }
}

// Source-over blend of one pixel, honoring bounds and an optional clip.
fn blend(img: &mut RgbaImage, x: i64, y: i64, clip: Option<&Rect>, color: Color, coverage: f64) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    if let Some(c) = clip {
        let fx = x as f64 + 0.5;
        let fy = y as f64 + 0.5;
        if fx < c.left || fx > c.right || fy < c.top || fy > c.bottom {
            return;
        }
    }
    let alpha = (color.a as f64 / 255.0 * coverage).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let mix = |src: u8, dst: u8| (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8;
    *dst = Rgba([
        mix(color.r, dst[0]),
        mix(color.g, dst[1]),
        mix(color.b, dst[2]),
        dst[3].max((alpha * 255.0).round() as u8),
    ]);
}

fn load_system_font() -> Option<FontVec> {
    for path in FONT_CANDIDATES {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}
