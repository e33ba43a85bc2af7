// File: crates/plot-demo/src/main.rs
// Summary: Demo renders a spline curve plot and a column plot to PNGs.

use anyhow::{Context, Result};
use plot_core::{
    AxisId, Color, ColorBar, ColumnSymbol, Columns, Curve, Interval, LinearColorMap, PaintEnv,
    Pen, Plot, PlotRenderer, Point,
};
use plot_raster::RasterCanvas;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new("out");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    render_spline_demo(&out_dir.join("spline.png"))?;
    render_columns_demo(&out_dir.join("columns.png"))?;

    Ok(())
}

fn render_spline_demo(path: &Path) -> Result<()> {
    let samples: Vec<Point> = (0..=20)
        .map(|i| {
            let x = i as f64 * 0.5;
            Point::new(x, (x * 0.9).sin() * 4.0 + 5.0)
        })
        .collect();

    let mut plot = Plot::new();
    plot.title = "Damped wave".to_string();
    plot.axis_mut(AxisId::XBottom).interval = Interval::new(0.0, 10.0);
    plot.axis_mut(AxisId::XBottom).title = "t [s]".to_string();
    plot.axis_mut(AxisId::YLeft).interval = Interval::new(0.0, 10.0);

    // raw samples as straight segments
    plot.insert_item(Box::new(Curve::new(
        "samples",
        Pen::new(Color::rgb(160, 160, 160), 1.0),
        samples.clone(),
    )));

    // interpolated version on top
    plot.insert_item(Box::new(
        Curve::new("spline", Pen::new(Color::rgb(30, 80, 200), 2.0), samples).with_spline(200),
    ));

    // color bar along the left scale
    plot.axis_mut(AxisId::YLeft).color_bar = Some(ColorBar {
        map: LinearColorMap { from: Color::rgb(0, 0, 160), to: Color::rgb(220, 40, 40) },
        interval: Interval::new(0.0, 10.0),
        width: 10.0,
    });

    render_to_png(&mut plot, path)
}

fn render_columns_demo(path: &Path) -> Result<()> {
    let samples: Vec<(f64, f64)> =
        (0..12).map(|i| (i as f64, ((i as f64 * 0.7).cos() * 3.0))).collect();

    let mut plot = Plot::new();
    plot.title = "Monthly deltas".to_string();

    let symbol = ColumnSymbol::new(Color::rgb(80, 160, 80));
    plot.insert_item(Box::new(
        Columns::new("delta", symbol, samples).with_baseline(0.0).with_width(0.6),
    ));
    plot.autoscale_axes(0.05);

    render_to_png(&mut plot, path)
}

fn render_to_png(plot: &mut Plot, path: &Path) -> Result<()> {
    let mut canvas = RasterCanvas::new(800, 600);
    let env = PaintEnv::default();
    PlotRenderer::new().render_to(plot, &mut canvas, &env);
    canvas.save_png(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
