// File: crates/plot-core/src/render.rs
// Summary: Renders a whole plot into a target rect on any canvas,
//          reconciling plot and surface resolution with a uniform scale.

use log::{debug, warn};

use crate::canvas::{Canvas, Color, PaintEnv, Pen, TextAlign};
use crate::error::PlotError;
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::layout::{self, LayoutOptions, LayoutRegions};
use crate::painter::Painter;
use crate::plot::{format_label, AxisId, Plot};
use crate::scale::ScaleMap;

/// What to leave out of the rendered output. Flags are independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscardFlags {
    pub background: bool,
    pub title: bool,
    pub legend: bool,
    pub canvas_background: bool,
}

impl Default for DiscardFlags {
    fn default() -> Self {
        // documents usually want the paper to stay blank
        Self { background: true, title: false, legend: false, canvas_background: false }
    }
}

/// Structural rendering choices. Flags are independent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutFlags {
    pub keep_margins: bool,
    pub frame_with_scales: bool,
}

/// Paints a plot document onto a canvas: screen, raster image or any
/// vector surface implementing the Canvas trait. Format selection and
/// file persistence stay with the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlotRenderer {
    pub discard: DiscardFlags,
    pub layout: LayoutFlags,
}

// Zeroes the axis base margins for the duration of a render pass and
// restores the previous values on drop, also on early returns.
struct AxisMarginGuard<'p> {
    plot: &'p mut Plot,
    saved: Option<[f64; 4]>,
}

impl<'p> AxisMarginGuard<'p> {
    fn new(plot: &'p mut Plot, zero_margins: bool) -> Self {
        let saved = zero_margins.then(|| {
            let mut saved = [0.0; 4];
            for (slot, axis) in saved.iter_mut().zip(plot.axes.iter_mut()) {
                *slot = axis.margin;
                axis.margin = 0.0;
            }
            saved
        });
        Self { plot, saved }
    }

    fn plot(&self) -> &Plot {
        self.plot
    }
}

impl Drop for AxisMarginGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved {
            for (axis, margin) in self.plot.axes.iter_mut().zip(saved) {
                axis.margin = margin;
            }
        }
    }
}

impl PlotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into the full device rect of `canvas`.
    pub fn render_to(&self, plot: &mut Plot, canvas: &mut dyn Canvas, env: &PaintEnv) {
        let size = canvas.device_size();
        self.render(plot, canvas, env, Rect::from_ltwh(0.0, 0.0, size.width, size.height));
    }

    /// Render a document of `size_mm` millimeters at `dpi`; the caller
    /// provides a canvas large enough for the resulting pixel rect.
    pub fn render_document(
        &self,
        plot: &mut Plot,
        canvas: &mut dyn Canvas,
        env: &PaintEnv,
        size_mm: Size,
        dpi: f64,
    ) {
        if size_mm.is_empty() || dpi <= 0.0 {
            return;
        }
        let rect = Rect::from_ltwh(
            0.0,
            0.0,
            size_mm.width * dpi / 25.4,
            size_mm.height * dpi / 25.4,
        );
        self.render(plot, canvas, env, rect);
    }

    /// Paint `plot` into `target` (device coordinates).
    ///
    /// Invalid targets and empty plots are silent no-ops: an aborted
    /// interactive repaint must never corrupt visible state. Any plot
    /// state touched during the pass is restored before returning.
    pub fn render(&self, plot: &mut Plot, canvas: &mut dyn Canvas, env: &PaintEnv, target: Rect) {
        if !target.is_valid() || plot.is_empty() {
            debug!("render skipped: invalid target {target:?} or empty plot");
            return;
        }

        if !self.discard.background {
            Painter::new(canvas, env).fill_rect(target, plot.background);
        }

        // Layout math happens in the plot's logical units; a uniform
        // scale maps them onto the surface resolution.
        let s = canvas.logical_dpi() / plot.logical_dpi;
        debug!("render target {target:?}, scale {s}");

        let guard = AxisMarginGuard::new(plot, self.layout.frame_with_scales);

        let mut options =
            LayoutOptions { ignore_frames: true, ignore_scrollbars: true, ..Default::default() };
        if !self.layout.keep_margins {
            options.ignore_margin = true;
        }
        if self.discard.legend {
            options.ignore_legend = true;
        }

        let layout_rect = target.scaled(1.0 / s);
        let regions = layout::activate(guard.plot(), &*canvas, layout_rect, &options);

        let maps = match build_canvas_maps(guard.plot(), &regions) {
            Ok(maps) => maps,
            Err(e) => {
                warn!("render skipped: {e}");
                return;
            }
        };

        canvas.save();
        canvas.scale(s, s);
        {
            let mut painter = Painter::new(canvas, env);

            self.render_canvas(guard.plot(), &mut painter, &regions.canvas_rect, &maps);

            if !self.discard.title && !guard.plot().title.is_empty() {
                self.render_title(guard.plot(), &mut painter, regions.title_rect);
            }
            if !self.discard.legend && !guard.plot().legend.is_empty() {
                self.render_legend(guard.plot(), &mut painter, regions.legend_rect);
            }
            for id in AxisId::ALL {
                if guard.plot().axis(id).enabled {
                    self.render_scale(
                        guard.plot(),
                        &mut painter,
                        id,
                        regions.scale_rects[id.index()],
                        &maps[id.index()],
                    );
                }
            }
        }
        canvas.restore();
    }

    fn render_canvas(
        &self,
        plot: &Plot,
        painter: &mut Painter<'_>,
        canvas_rect: &Rect,
        maps: &[ScaleMap; 4],
    ) {
        painter.with_saved(|p| {
            let mut r = canvas_rect.adjusted(0.0, 0.0, -1.0, -1.0);
            if self.layout.frame_with_scales {
                r = r.adjusted(-1.0, -1.0, 1.0, 1.0);
                p.set_pen(Pen::new(Color::BLACK, 1.0));
            } else {
                p.set_pen(Pen::none());
            }
            if self.discard.canvas_background {
                p.set_brush(None);
            } else {
                p.set_brush(Some(plot.canvas_background));
            }
            p.draw_rect(r);
        });

        painter.with_saved(|p| {
            p.set_clip(Some(*canvas_rect));
            for item in &plot.items {
                let (x_axis, y_axis) = item.axes();
                item.draw(p, &maps[x_axis.index()], &maps[y_axis.index()], canvas_rect);
            }
        });
    }

    fn render_title(&self, plot: &Plot, painter: &mut Painter<'_>, rect: Rect) {
        painter.set_font(plot.title_font);
        painter.set_pen(Pen::new(plot.text_color, 1.0));
        painter.draw_text_rect(rect, TextAlign::Center, &plot.title);
    }

    fn render_legend(&self, plot: &Plot, painter: &mut Painter<'_>, rect: Rect) {
        let rects = layout::legend_item_rects(plot, painter.canvas(), rect);
        for (entry, r) in plot.legend.iter().zip(rects) {
            painter.with_saved(|p| {
                p.set_clip(Some(r));

                let swatch = layout::LEGEND_SWATCH;
                let sy = r.center().y - swatch * 0.5;
                p.fill_rect(
                    Rect::from_ltwh(r.left + layout::LEGEND_SPACING, sy, swatch, swatch),
                    entry.color,
                );

                let text_rect = Rect::from_ltrb(
                    r.left + 2.0 * layout::LEGEND_SPACING + swatch,
                    r.top,
                    r.right,
                    r.bottom,
                );
                p.set_font(plot.legend_font);
                p.set_pen(Pen::new(plot.text_color, 1.0));
                p.draw_text_rect(text_rect, TextAlign::Left, &entry.label);
            });
        }
    }

    // Backbone, ticks and tick labels of one scale. The canvas map is
    // reused: its paint interval already matches the scale rect.
    fn render_scale(
        &self,
        plot: &Plot,
        painter: &mut Painter<'_>,
        id: AxisId,
        rect: Rect,
        map: &ScaleMap,
    ) {
        let axis = plot.axis(id);
        let (start_dist, end_dist) = axis.border_dist;
        let mut base = axis.margin;

        if let Some(cb) = &axis.color_bar {
            let bar = color_bar_rect(id, base, cb.width, rect, start_dist, end_dist);
            let orientation = if id.is_horizontal() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            painter.draw_color_bar(&cb.map, cb.interval, map, orientation, bar);
            base += cb.width + layout::COLOR_BAR_SPACING;
        }

        painter.with_saved(|p| {
            p.set_pen(Pen::new(plot.text_color, 1.0));
            p.set_font(axis.font);

            let font = layout::layout_font(&axis.font, plot.logical_dpi);
            let tick = axis.tick_length;
            let gap = layout::TICK_LABEL_SPACING;

            // backbone position along the canvas-facing edge
            match id {
                AxisId::YLeft => {
                    let x = rect.right - 1.0 - base;
                    p.draw_line(
                        Point::new(x, rect.top + start_dist),
                        Point::new(x, rect.bottom - end_dist),
                    );
                    for v in axis.major_ticks() {
                        let pos = map.transform(v);
                        p.draw_line(Point::new(x, pos), Point::new(x - tick, pos));
                        let label = format_label(v);
                        let ext = p.canvas().text_extent(&label, &font);
                        p.draw_text(
                            Point::new(x - tick - gap - ext.width, pos - ext.height * 0.5),
                            &label,
                        );
                    }
                }
                AxisId::YRight => {
                    let x = rect.left + base;
                    p.draw_line(
                        Point::new(x, rect.top + start_dist),
                        Point::new(x, rect.bottom - end_dist),
                    );
                    for v in axis.major_ticks() {
                        let pos = map.transform(v);
                        p.draw_line(Point::new(x, pos), Point::new(x + tick, pos));
                        let label = format_label(v);
                        let ext = p.canvas().text_extent(&label, &font);
                        p.draw_text(Point::new(x + tick + gap, pos - ext.height * 0.5), &label);
                    }
                }
                AxisId::XTop => {
                    let y = rect.bottom - 1.0 - base;
                    p.draw_line(
                        Point::new(rect.left + start_dist, y),
                        Point::new(rect.right - end_dist, y),
                    );
                    for v in axis.major_ticks() {
                        let pos = map.transform(v);
                        p.draw_line(Point::new(pos, y), Point::new(pos, y - tick));
                        let label = format_label(v);
                        let ext = p.canvas().text_extent(&label, &font);
                        p.draw_text(
                            Point::new(pos - ext.width * 0.5, y - tick - gap - ext.height),
                            &label,
                        );
                    }
                }
                AxisId::XBottom => {
                    let y = rect.top + base;
                    p.draw_line(
                        Point::new(rect.left + start_dist, y),
                        Point::new(rect.right - end_dist, y),
                    );
                    for v in axis.major_ticks() {
                        let pos = map.transform(v);
                        p.draw_line(Point::new(pos, y), Point::new(pos, y + tick));
                        let label = format_label(v);
                        let ext = p.canvas().text_extent(&label, &font);
                        p.draw_text(Point::new(pos - ext.width * 0.5, y + tick + gap), &label);
                    }
                }
            }

            // axis title, horizontal text at the outer edge of the band
            if !axis.title.is_empty() {
                let ext = p.canvas().text_extent(&axis.title, &font);
                let strip = match id {
                    AxisId::XBottom => {
                        Rect::from_ltrb(rect.left, rect.bottom - ext.height, rect.right, rect.bottom)
                    }
                    AxisId::XTop => {
                        Rect::from_ltrb(rect.left, rect.top, rect.right, rect.top + ext.height)
                    }
                    AxisId::YLeft | AxisId::YRight => {
                        Rect::from_ltrb(rect.left, rect.top, rect.right, rect.top + ext.height)
                    }
                };
                p.draw_text_rect(strip, TextAlign::Center, &axis.title);
            }
        });
    }
}

/// Scale maps for one render pass: enabled axes map onto their scale
/// rect (minus border distances), disabled axes onto the canvas rect
/// inset by the configured canvas margin.
pub fn build_canvas_maps(
    plot: &Plot,
    regions: &LayoutRegions,
) -> Result<[ScaleMap; 4], PlotError> {
    Ok([
        canvas_map(plot, regions, AxisId::YLeft)?,
        canvas_map(plot, regions, AxisId::YRight)?,
        canvas_map(plot, regions, AxisId::XTop)?,
        canvas_map(plot, regions, AxisId::XBottom)?,
    ])
}

fn canvas_map(plot: &Plot, regions: &LayoutRegions, id: AxisId) -> Result<ScaleMap, PlotError> {
    let axis = plot.axis(id);
    let canvas = regions.canvas_rect;

    let (from, to) = if axis.enabled {
        let r = regions.scale_rects[id.index()];
        let (start_dist, end_dist) = axis.border_dist;
        if id.is_horizontal() {
            (r.left + start_dist, r.right - end_dist)
        } else {
            (r.bottom - end_dist, r.top + start_dist)
        }
    } else {
        let margin = plot.canvas_margins[id.index()];
        if id.is_horizontal() {
            (canvas.left + margin, canvas.right - margin)
        } else {
            (canvas.bottom - margin, canvas.top + margin)
        }
    };

    ScaleMap::new(axis.transformation, axis.interval.min, axis.interval.max, from, to)
}

fn color_bar_rect(
    id: AxisId,
    base: f64,
    width: f64,
    rect: Rect,
    start_dist: f64,
    end_dist: f64,
) -> Rect {
    match id {
        AxisId::YLeft => Rect::from_ltwh(
            rect.right - base - width,
            rect.top + start_dist,
            width,
            rect.height() - start_dist - end_dist,
        ),
        AxisId::YRight => Rect::from_ltwh(
            rect.left + base,
            rect.top + start_dist,
            width,
            rect.height() - start_dist - end_dist,
        ),
        AxisId::XTop => Rect::from_ltwh(
            rect.left + start_dist,
            rect.bottom - base - width,
            rect.width() - start_dist - end_dist,
            width,
        ),
        AxisId::XBottom => Rect::from_ltwh(
            rect.left + start_dist,
            rect.top + base,
            rect.width() - start_dist - end_dist,
            width,
        ),
    }
}
