// File: crates/plot-core/tests/painter.rs
// Purpose: Validate painter backend workarounds: polyline chunking,
//          manual clipping and font unscaling.

mod common;

use common::{DrawOp, RecordingCanvas};
use plot_core::{
    Canvas, Color, FontSpec, Interval, LinearColorMap, Orientation, PaintEnv, Painter, Pen, Point,
    Rect, ScaleMap, Transformation,
};

fn long_polyline(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, (i as f64 * 0.1).sin())).collect()
}

#[test]
fn polylines_are_chunked_for_backends_that_ask() {
    let mut canvas = RecordingCanvas::new(2000.0, 400.0).with_chunked_polylines();
    let env = PaintEnv::default();

    let points = long_polyline(1000);
    Painter::new(&mut canvas, &env).draw_polyline(&points);

    let chunks = canvas.polylines();
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.len() <= 21, "chunk of {} points", chunk.len());
        assert!(chunk.len() >= 2);
    }

    // consecutive chunks share their boundary point, no visible gaps
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].last(), pair[1].first());
    }

    // every input point is drawn
    let total: usize = chunks.iter().map(|c| c.len()).sum();
    assert_eq!(total, 1000 + chunks.len() - 1);
}

#[test]
fn chunking_respects_the_paint_env_switch() {
    let mut canvas = RecordingCanvas::new(2000.0, 400.0).with_chunked_polylines();
    let env = PaintEnv { polyline_splitting: false, ..PaintEnv::default() };

    let points = long_polyline(1000);
    Painter::new(&mut canvas, &env).draw_polyline(&points);

    let chunks = canvas.polylines();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].len(), 1000);
}

#[test]
fn backends_without_chunk_request_get_one_call() {
    let mut canvas = RecordingCanvas::new(2000.0, 400.0);
    let env = PaintEnv::default();

    Painter::new(&mut canvas, &env).draw_polyline(&long_polyline(1000));

    assert_eq!(canvas.polylines().len(), 1);
}

#[test]
fn manual_clipping_applies_when_backend_ignores_clip() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0).without_native_clipping();
    let env = PaintEnv::default();
    canvas.set_clip(Some(Rect::from_ltrb(100.0, 100.0, 200.0, 200.0)));
    canvas.ops.clear();

    let mut painter = Painter::new(&mut canvas, &env);
    // fully outside the clip
    painter.draw_polyline(&[Point::new(0.0, 0.0), Point::new(50.0, 50.0)]);
    // crossing the clip
    painter.draw_polyline(&[Point::new(0.0, 150.0), Point::new(400.0, 150.0)]);

    let chunks = canvas.polylines();
    assert_eq!(chunks.len(), 1, "outside segment must be dropped");
    assert_eq!(chunks[0][0], Point::new(100.0, 150.0));
    assert_eq!(chunks[0][1], Point::new(200.0, 150.0));
}

#[test]
fn native_clipping_backends_receive_raw_points() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0);
    let env = PaintEnv::default();
    canvas.set_clip(Some(Rect::from_ltrb(100.0, 100.0, 200.0, 200.0)));
    canvas.ops.clear();

    let points = [Point::new(0.0, 150.0), Point::new(400.0, 150.0)];
    Painter::new(&mut canvas, &env).draw_polyline(&points);

    // the backend clips itself, the painter passes the points through
    assert_eq!(canvas.polylines(), vec![&points.to_vec()]);
}

#[test]
fn fill_rect_is_clipped_to_the_window() {
    let mut canvas = RecordingCanvas::new(400.0, 300.0);
    let env = PaintEnv::default();

    let mut painter = Painter::new(&mut canvas, &env);
    // hangs over all four edges
    painter.fill_rect(Rect::from_ltrb(-100.0, -100.0, 1000.0, 1000.0), Color::WHITE);
    // entirely outside
    painter.fill_rect(Rect::from_ltrb(500.0, 0.0, 600.0, 100.0), Color::WHITE);
    // invalid
    painter.fill_rect(Rect::from_ltrb(10.0, 10.0, 10.0, 10.0), Color::WHITE);

    let fills = canvas.fill_rects();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].0, Rect::from_ltrb(0.0, 0.0, 400.0, 300.0));
}

#[test]
fn partially_clipped_rect_is_filled_and_outlined() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0).without_native_clipping();
    let env = PaintEnv::default();
    canvas.set_clip(Some(Rect::from_ltrb(0.0, 0.0, 100.0, 100.0)));
    canvas.set_brush(Some(Color::rgb(200, 0, 0)));
    canvas.ops.clear();

    Painter::new(&mut canvas, &env).draw_rect(Rect::from_ltrb(50.0, 50.0, 150.0, 150.0));

    // visible part filled
    let fills = canvas.fill_rects();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].0, Rect::from_ltrb(50.0, 50.0, 100.0, 100.0));
    assert_eq!(fills[0].1, Color::rgb(200, 0, 0));

    // outline stroked as a clipped polyline, never a raw rect call
    assert!(!canvas.polylines().is_empty());
    assert!(!canvas.ops.iter().any(|op| matches!(op, DrawOp::Rect(_))));
}

#[test]
fn rect_outside_clip_is_dropped() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0).without_native_clipping();
    let env = PaintEnv::default();
    canvas.set_clip(Some(Rect::from_ltrb(0.0, 0.0, 100.0, 100.0)));
    canvas.ops.clear();

    Painter::new(&mut canvas, &env).draw_rect(Rect::from_ltrb(200.0, 200.0, 300.0, 300.0));

    assert!(canvas.ops.is_empty());
}

#[test]
fn point_fonts_are_pinned_on_high_dpi_surfaces() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0).with_dpi(300.0);
    let env = PaintEnv::default(); // reference_dpi 96

    let mut painter = Painter::new(&mut canvas, &env);
    painter.draw_text(Point::new(10.0, 10.0), "hello");

    // the font handed to the backend carries the pixel size computed at
    // the reference DPI: 10pt * 96 / 72 at the default font
    let pinned = canvas
        .ops
        .iter()
        .position(|op| matches!(op, DrawOp::Text(_, _)))
        .expect("text drawn");
    assert!(pinned > 0);

    // after the draw the original point-sized font is restored
    assert_eq!(canvas.font().pixel_size, None);
}

#[test]
fn pixel_fonts_and_matching_dpi_are_left_alone() {
    let mut canvas = RecordingCanvas::new(400.0, 400.0);
    let env = PaintEnv::default();
    canvas.set_font(FontSpec { point_size: 10.0, pixel_size: Some(13.0) });

    let mut painter = Painter::new(&mut canvas, &env);
    painter.draw_text(Point::new(10.0, 10.0), "x");

    assert_eq!(canvas.font().pixel_size, Some(13.0));
}

#[test]
fn vertical_color_bar_puts_the_max_color_at_the_top() {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let env = PaintEnv::default();

    let map = ScaleMap::new(Transformation::Linear, 0.0, 10.0, 0.0, 100.0).unwrap();
    let colors = LinearColorMap::new(Color::rgb(0, 0, 255), Color::rgb(255, 0, 0));
    let rect = Rect::from_ltwh(10.0, 20.0, 12.0, 100.0);

    Painter::new(&mut canvas, &env).draw_color_bar(
        &colors,
        Interval::new(0.0, 10.0),
        &map,
        Orientation::Vertical,
        rect,
    );

    let lines = canvas.colored_lines();
    assert!(!lines.is_empty());
    let top = lines.iter().min_by(|a, b| a.1.y.total_cmp(&b.1.y)).unwrap();
    let bottom = lines.iter().max_by(|a, b| a.1.y.total_cmp(&b.1.y)).unwrap();
    assert_eq!(top.0, Color::rgb(255, 0, 0));
    assert_eq!(bottom.0, Color::rgb(0, 0, 255));
    // one strip line per device pixel, spanning the bar width
    assert_eq!(lines.len(), 101);
    assert_eq!(top.1.x, rect.left);
    assert_eq!(top.2.x, rect.right);
}

#[test]
fn horizontal_color_bar_runs_min_to_max_left_to_right() {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let env = PaintEnv::default();

    let map = ScaleMap::new(Transformation::Linear, 0.0, 10.0, 0.0, 100.0).unwrap();
    let colors = LinearColorMap::new(Color::rgb(0, 0, 255), Color::rgb(255, 0, 0));
    let rect = Rect::from_ltwh(10.0, 20.0, 100.0, 12.0);

    Painter::new(&mut canvas, &env).draw_color_bar(
        &colors,
        Interval::new(0.0, 10.0),
        &map,
        Orientation::Horizontal,
        rect,
    );

    let lines = canvas.colored_lines();
    assert!(!lines.is_empty());
    let left = lines.iter().min_by(|a, b| a.1.x.total_cmp(&b.1.x)).unwrap();
    let right = lines.iter().max_by(|a, b| a.1.x.total_cmp(&b.1.x)).unwrap();
    assert_eq!(left.0, Color::rgb(0, 0, 255));
    assert_eq!(right.0, Color::rgb(255, 0, 0));
}

#[test]
fn with_saved_restores_state_on_the_canvas() {
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let env = PaintEnv::default();

    let mut painter = Painter::new(&mut canvas, &env);
    painter.set_pen(Pen::new(Color::BLACK, 2.0));
    painter.with_saved(|p| {
        p.set_pen(Pen::new(Color::WHITE, 5.0));
        p.set_clip(Some(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)));
    });

    assert_eq!(canvas.pen(), Pen::new(Color::BLACK, 2.0));
    assert_eq!(canvas.clip(), None);
}
