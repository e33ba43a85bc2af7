// File: crates/plot-core/src/layout.rs
// Summary: Splits a target rect into title, legend, scale and canvas
//          regions. Pure function of the plot, the target rect and the
//          option flags; nothing is cached.

use crate::canvas::{Canvas, FontSpec};
use crate::geometry::{Rect, Size};
use crate::plot::{format_label, AxisId, AxisState, LegendPosition, Plot};

pub(crate) const TITLE_PAD: f64 = 4.0;
pub(crate) const TICK_LABEL_SPACING: f64 = 2.0;
pub(crate) const COLOR_BAR_SPACING: f64 = 4.0;
pub(crate) const LEGEND_SWATCH: f64 = 12.0;
pub(crate) const LEGEND_SPACING: f64 = 4.0;
pub(crate) const LEGEND_ITEM_PAD: f64 = 4.0;

/// Structural layout choices. Flags are independent of each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    pub ignore_margin: bool,
    pub ignore_frames: bool,
    /// Scroll bars belong to the interactive widget, not the render
    /// path; the flag exists so callers can share one option set.
    pub ignore_scrollbars: bool,
    pub ignore_legend: bool,
}

/// Result of one layout pass. Regions that do not apply stay at the
/// default (invalid) rect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutRegions {
    pub title_rect: Rect,
    pub legend_rect: Rect,
    pub canvas_rect: Rect,
    pub scale_rects: [Rect; 4],
}

/// Font with its pixel size resolved at the plot's logical DPI, so text
/// measurement is independent of the target surface.
pub(crate) fn layout_font(font: &FontSpec, dpi: f64) -> FontSpec {
    FontSpec { pixel_size: Some(font.resolve_px(dpi)), ..*font }
}

/// Compute the layout regions for `plot` within `target`.
///
/// The enabled scale bands plus the canvas tile the area left over after
/// title and legend exactly; the vertical bands span the corner squares.
pub fn activate(
    plot: &Plot,
    metrics: &dyn Canvas,
    target: Rect,
    options: &LayoutOptions,
) -> LayoutRegions {
    let mut regions = LayoutRegions::default();
    if !target.is_valid() {
        return regions;
    }

    let mut rect = target;
    if !options.ignore_margin && plot.margin > 0.0 {
        let m = plot.margin;
        rect = rect.adjusted(m, m, -m, -m);
    }
    if !options.ignore_frames && plot.frame_width > 0.0 {
        let f = plot.frame_width;
        rect = rect.adjusted(f, f, -f, -f);
    }

    if !plot.title.is_empty() {
        let font = layout_font(&plot.title_font, plot.logical_dpi);
        let h = metrics.text_extent(&plot.title, &font).height + TITLE_PAD;
        regions.title_rect = Rect::from_ltwh(rect.left, rect.top, rect.width(), h);
        rect.top += h;
    }

    if !options.ignore_legend && !plot.legend.is_empty() {
        let item = legend_item_size(plot, metrics);
        let count = plot.legend.len();
        match plot.legend_position {
            LegendPosition::Bottom => {
                let rows = legend_rows(item.width, rect.width(), count);
                let h = rows as f64 * item.height;
                regions.legend_rect = Rect::from_ltwh(rect.left, rect.bottom - h, rect.width(), h);
                rect.bottom -= h;
            }
            LegendPosition::Top => {
                let rows = legend_rows(item.width, rect.width(), count);
                let h = rows as f64 * item.height;
                regions.legend_rect = Rect::from_ltwh(rect.left, rect.top, rect.width(), h);
                rect.top += h;
            }
            LegendPosition::Left => {
                regions.legend_rect =
                    Rect::from_ltwh(rect.left, rect.top, item.width, rect.height());
                rect.left += item.width;
            }
            LegendPosition::Right => {
                regions.legend_rect =
                    Rect::from_ltwh(rect.right - item.width, rect.top, item.width, rect.height());
                rect.right -= item.width;
            }
        }
    }

    let mut dims = [0.0f64; 4];
    for id in AxisId::ALL {
        let axis = plot.axis(id);
        if axis.enabled {
            dims[id.index()] = scale_band_dim(axis, id, plot.logical_dpi, metrics);
        }
    }

    let canvas = Rect::from_ltrb(
        rect.left + dims[AxisId::YLeft.index()],
        rect.top + dims[AxisId::XTop.index()],
        rect.right - dims[AxisId::YRight.index()],
        rect.bottom - dims[AxisId::XBottom.index()],
    );
    regions.canvas_rect = canvas;

    regions.scale_rects[AxisId::YLeft.index()] =
        Rect::from_ltwh(rect.left, rect.top, dims[AxisId::YLeft.index()], rect.height());
    regions.scale_rects[AxisId::YRight.index()] =
        Rect::from_ltwh(canvas.right, rect.top, dims[AxisId::YRight.index()], rect.height());
    regions.scale_rects[AxisId::XTop.index()] =
        Rect::from_ltwh(canvas.left, rect.top, canvas.width(), dims[AxisId::XTop.index()]);
    regions.scale_rects[AxisId::XBottom.index()] =
        Rect::from_ltwh(canvas.left, canvas.bottom, canvas.width(), dims[AxisId::XBottom.index()]);

    regions
}

// Band thickness of an enabled scale: base margin, tick marks, tick
// labels and an optional color bar.
fn scale_band_dim(axis: &AxisState, id: AxisId, dpi: f64, metrics: &dyn Canvas) -> f64 {
    let font = layout_font(&axis.font, dpi);
    let mut label = Size::default();
    for tick in axis.major_ticks() {
        let extent = metrics.text_extent(&format_label(tick), &font);
        label.width = label.width.max(extent.width);
        label.height = label.height.max(extent.height);
    }

    // one pixel for the backbone at the canvas-facing edge
    let mut dim = axis.margin + 1.0 + axis.tick_length + TICK_LABEL_SPACING;
    dim += if id.is_horizontal() { label.height } else { label.width };
    if let Some(cb) = &axis.color_bar {
        dim += cb.width + COLOR_BAR_SPACING;
    }
    if !axis.title.is_empty() {
        dim += metrics.text_extent(&axis.title, &font).height + TITLE_PAD;
    }
    dim
}

/// Size of the largest legend item: color swatch, spacing and label.
pub fn legend_item_size(plot: &Plot, metrics: &dyn Canvas) -> Size {
    let font = layout_font(&plot.legend_font, plot.logical_dpi);
    let mut item = Size::default();
    for entry in &plot.legend {
        let extent = metrics.text_extent(&entry.label, &font);
        item.width = item.width.max(LEGEND_SWATCH + 2.0 * LEGEND_SPACING + extent.width);
        item.height = item.height.max(extent.height.max(LEGEND_SWATCH) + LEGEND_ITEM_PAD);
    }
    item.width += LEGEND_ITEM_PAD;
    item
}

/// Columns that fit `width`, at least one, at most `count`.
pub fn legend_columns(item_width: f64, width: f64, count: usize) -> usize {
    if item_width <= 0.0 || count == 0 {
        return 1;
    }
    ((width / item_width) as usize).clamp(1, count)
}

fn legend_rows(item_width: f64, width: f64, count: usize) -> usize {
    let cols = legend_columns(item_width, width, count);
    count.div_ceil(cols)
}

/// Item cells within the legend rect, row-major.
pub fn legend_item_rects(plot: &Plot, metrics: &dyn Canvas, rect: Rect) -> Vec<Rect> {
    let item = legend_item_size(plot, metrics);
    let count = plot.legend.len();
    let cols = legend_columns(item.width, rect.width(), count);
    (0..count)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            Rect::from_ltwh(
                rect.left + col * item.width,
                rect.top + row * item.height,
                item.width,
                item.height,
            )
        })
        .collect()
}
