// File: crates/plot-core/tests/layout.rs
// Purpose: Validate the layout engine: region tiling, margins, title and
//          legend strips.

mod common;

use common::RecordingCanvas;
use plot_core::layout::{self, LayoutOptions};
use plot_core::{AxisId, Color, LegendEntry, LegendPosition, Plot, Rect};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn invalid_target_yields_default_regions() {
    let plot = Plot::new();
    let canvas = RecordingCanvas::new(400.0, 300.0);

    let regions = layout::activate(
        &plot,
        &canvas,
        Rect::from_ltrb(10.0, 10.0, 10.0, 10.0),
        &LayoutOptions::default(),
    );

    assert!(!regions.canvas_rect.is_valid());
    assert!(!regions.title_rect.is_valid());
}

#[test]
fn disabled_axes_leave_the_canvas_at_the_full_target() {
    let mut plot = Plot::new();
    for id in AxisId::ALL {
        plot.axis_mut(id).enabled = false;
    }
    let canvas = RecordingCanvas::new(400.0, 300.0);
    let target = Rect::from_ltwh(0.0, 0.0, 400.0, 300.0);

    let regions = layout::activate(&plot, &canvas, target, &LayoutOptions::default());

    assert_eq!(regions.canvas_rect, target);
    for r in &regions.scale_rects {
        assert!(!r.is_valid());
    }
}

#[test]
fn margin_is_kept_unless_ignored() {
    let mut plot = Plot::new();
    for id in AxisId::ALL {
        plot.axis_mut(id).enabled = false;
    }
    plot.margin = 10.0;
    let canvas = RecordingCanvas::new(400.0, 300.0);
    let target = Rect::from_ltwh(0.0, 0.0, 400.0, 300.0);

    let kept = layout::activate(&plot, &canvas, target, &LayoutOptions::default());
    assert_eq!(kept.canvas_rect, Rect::from_ltrb(10.0, 10.0, 390.0, 290.0));

    let ignored = layout::activate(
        &plot,
        &canvas,
        target,
        &LayoutOptions { ignore_margin: true, ..LayoutOptions::default() },
    );
    assert_eq!(ignored.canvas_rect, target);
}

#[test]
fn scale_bands_and_canvas_tile_the_target() {
    let mut plot = Plot::new();
    // all four axes enabled, asymmetric setup
    for id in AxisId::ALL {
        plot.axis_mut(id).enabled = true;
    }
    plot.axis_mut(AxisId::YRight).font.point_size = 12.0;

    let canvas = RecordingCanvas::new(640.0, 480.0);
    let target = Rect::from_ltwh(0.0, 0.0, 640.0, 480.0);
    let regions = layout::activate(&plot, &canvas, target, &LayoutOptions::default());

    let c = regions.canvas_rect;
    let left = regions.scale_rects[AxisId::YLeft.index()];
    let right = regions.scale_rects[AxisId::YRight.index()];
    let top = regions.scale_rects[AxisId::XTop.index()];
    let bottom = regions.scale_rects[AxisId::XBottom.index()];

    assert!(c.is_valid());

    // vertical bands span the full height including the corners
    assert!(approx(left.top, target.top) && approx(left.bottom, target.bottom));
    assert!(approx(right.top, target.top) && approx(right.bottom, target.bottom));

    // horizontal bands span exactly the canvas width
    assert!(approx(top.left, c.left) && approx(top.right, c.right));
    assert!(approx(bottom.left, c.left) && approx(bottom.right, c.right));

    // bands meet the canvas with no gap and no overlap
    assert!(approx(left.right, c.left));
    assert!(approx(right.left, c.right));
    assert!(approx(top.bottom, c.top));
    assert!(approx(bottom.top, c.bottom));

    // widths add up across the target
    assert!(approx(left.width() + c.width() + right.width(), target.width()));
    assert!(approx(top.height() + c.height() + bottom.height(), target.height()));
}

#[test]
fn title_reserves_a_strip_at_the_top() {
    let mut plot = Plot::new();
    plot.title = "Measurements".to_string();
    let canvas = RecordingCanvas::new(400.0, 300.0);
    let target = Rect::from_ltwh(0.0, 0.0, 400.0, 300.0);

    let regions = layout::activate(&plot, &canvas, target, &LayoutOptions::default());

    assert!(regions.title_rect.is_valid());
    assert!(approx(regions.title_rect.top, 0.0));
    assert!(approx(regions.title_rect.width(), 400.0));
    // everything below starts where the title strip ends
    for id in AxisId::ALL {
        let r = regions.scale_rects[id.index()];
        if r.is_valid() {
            assert!(r.top >= regions.title_rect.bottom - 1e-9);
        }
    }
    assert!(regions.canvas_rect.top >= regions.title_rect.bottom - 1e-9);
}

#[test]
fn bottom_legend_reserves_rows() {
    let mut plot = Plot::new();
    plot.legend.push(LegendEntry { label: "a".into(), color: Color::rgb(255, 0, 0) });
    plot.legend.push(LegendEntry { label: "b".into(), color: Color::rgb(0, 255, 0) });
    plot.legend_position = LegendPosition::Bottom;

    let canvas = RecordingCanvas::new(400.0, 300.0);
    let target = Rect::from_ltwh(0.0, 0.0, 400.0, 300.0);

    let regions = layout::activate(&plot, &canvas, target, &LayoutOptions::default());

    assert!(regions.legend_rect.is_valid());
    assert!(approx(regions.legend_rect.bottom, 300.0));
    assert!(regions.canvas_rect.bottom <= regions.legend_rect.top + 1e-9);

    // both entries fit one row on a 400px wide target
    let item = layout::legend_item_size(&plot, &canvas);
    assert!(approx(regions.legend_rect.height(), item.height));

    let ignored = layout::activate(
        &plot,
        &canvas,
        target,
        &LayoutOptions { ignore_legend: true, ..LayoutOptions::default() },
    );
    assert!(!ignored.legend_rect.is_valid());
}

#[test]
fn side_legend_reserves_a_column() {
    let mut plot = Plot::new();
    plot.legend.push(LegendEntry { label: "series".into(), color: Color::rgb(0, 0, 255) });
    plot.legend_position = LegendPosition::Right;

    let canvas = RecordingCanvas::new(400.0, 300.0);
    let target = Rect::from_ltwh(0.0, 0.0, 400.0, 300.0);
    let regions = layout::activate(&plot, &canvas, target, &LayoutOptions::default());

    let item = layout::legend_item_size(&plot, &canvas);
    assert!(approx(regions.legend_rect.width(), item.width));
    assert!(approx(regions.legend_rect.right, 400.0));
    assert!(approx(regions.legend_rect.height(), 300.0));
}

#[test]
fn legend_cells_are_row_major_and_inside_the_rect() {
    let mut plot = Plot::new();
    for (i, name) in ["one", "two", "three", "four", "five"].iter().enumerate() {
        plot.legend.push(LegendEntry {
            label: (*name).into(),
            color: Color::rgb(40 * i as u8, 0, 0),
        });
    }

    let canvas = RecordingCanvas::new(400.0, 300.0);
    let rect = Rect::from_ltwh(0.0, 200.0, 400.0, 100.0);
    let cells = layout::legend_item_rects(&plot, &canvas, rect);

    assert_eq!(cells.len(), plot.legend.len());
    let item = layout::legend_item_size(&plot, &canvas);
    for cell in &cells {
        assert!(approx(cell.width(), item.width));
        assert!(approx(cell.height(), item.height));
        assert!(cell.left >= rect.left - 1e-9);
        assert!(cell.right <= rect.right + 1e-9);
    }
    // first two cells share a row, reading order left to right
    assert!(approx(cells[0].top, cells[1].top) || approx(cells[0].left, cells[1].left));
    assert!(cells[0].left < cells[1].left || cells[0].top < cells[1].top);
}
