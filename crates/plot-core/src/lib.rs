// File: crates/plot-core/src/lib.rs
// Summary: Core library entry point; exports the public plotting API.

pub mod canvas;
pub mod colormap;
pub mod column;
pub mod error;
pub mod geometry;
pub mod interval;
pub mod items;
pub mod layout;
pub mod painter;
pub mod plot;
pub mod render;
pub mod scale;
pub mod spline;

pub use canvas::{Canvas, Color, FontSpec, ImageRef, PaintEnv, Pen, TextAlign};
pub use colormap::LinearColorMap;
pub use column::{ColumnRect, ColumnStyle, ColumnSymbol, Direction, FrameStyle};
pub use error::PlotError;
pub use geometry::{Orientation, Point, Rect, Size};
pub use interval::Interval;
pub use items::{Columns, Curve, CurveStyle};
pub use layout::{LayoutOptions, LayoutRegions};
pub use painter::Painter;
pub use plot::{AxisId, AxisState, ColorBar, LegendEntry, LegendPosition, Plot, PlotItem};
pub use render::{build_canvas_maps, DiscardFlags, LayoutFlags, PlotRenderer};
pub use scale::{ScaleMap, Transformation};
pub use spline::{
    ClampedSlopes, CurvePath, HermiteSpline, NaturalSlopes, PathElement, SlopeStrategy,
    SplinePolynom,
};
