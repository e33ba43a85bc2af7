// File: crates/plot-core/src/error.rs
// Summary: Library error type.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum PlotError {
    /// The data interval collapses to a single value after applying the
    /// axis transformation, so a normalized fraction cannot be formed.
    #[error("degenerate scale interval [{min}, {max}]")]
    DegenerateInterval { min: f64, max: f64 },

    /// Control points unsuitable for interpolation.
    #[error("invalid control points: {0}")]
    InvalidControlPoints(&'static str),
}
