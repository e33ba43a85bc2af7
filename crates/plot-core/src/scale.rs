// File: crates/plot-core/src/scale.rs
// Summary: Scale transformations and the data-to-paint coordinate map.

use crate::error::PlotError;
use crate::interval::Interval;

/// Monotonic transformation applied to data values before the linear
/// mapping into the paint interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transformation {
    #[default]
    Linear,
    Log10,
}

impl Transformation {
    // Smallest value fed into log10; keeps the forward map finite.
    const LOG_MIN: f64 = 1e-150;

    pub fn forward(&self, v: f64) -> f64 {
        match self {
            Transformation::Linear => v,
            Transformation::Log10 => v.max(Self::LOG_MIN).log10(),
        }
    }

    pub fn inverse(&self, v: f64) -> f64 {
        match self {
            Transformation::Linear => v,
            Transformation::Log10 => 10f64.powf(v),
        }
    }
}

/// Map between a data interval and a paint (device) interval.
///
/// Both intervals may be given in either order, which is how inverted
/// axes are expressed. Values are normalized through the transformation
/// into a fraction of the data interval and then interpolated linearly
/// into the paint interval.
#[derive(Clone, Copy, Debug)]
pub struct ScaleMap {
    transformation: Transformation,
    s1: f64,
    s2: f64,
    p1: f64,
    p2: f64,
    ts1: f64,
    cnv: f64,
}

impl ScaleMap {
    pub fn new(
        transformation: Transformation,
        s1: f64,
        s2: f64,
        p1: f64,
        p2: f64,
    ) -> Result<Self, PlotError> {
        let ts1 = transformation.forward(s1);
        let span = transformation.forward(s2) - ts1;
        if !span.is_finite() || span == 0.0 {
            return Err(PlotError::DegenerateInterval { min: s1, max: s2 });
        }
        Ok(Self { transformation, s1, s2, p1, p2, ts1, cnv: (p2 - p1) / span })
    }

    /// Re-target an existing map onto another paint interval.
    pub fn set_paint_interval(&mut self, p1: f64, p2: f64) {
        self.p1 = p1;
        self.p2 = p2;
        self.cnv = (p2 - p1) / (self.transformation.forward(self.s2) - self.ts1);
    }

    pub fn transform(&self, v: f64) -> f64 {
        self.p1 + (self.transformation.forward(v) - self.ts1) * self.cnv
    }

    pub fn inv_transform(&self, p: f64) -> f64 {
        if self.cnv == 0.0 {
            // zero width paint interval; every value maps onto p1
            return self.s1;
        }
        self.transformation.inverse(self.ts1 + (p - self.p1) / self.cnv)
    }

    pub fn s1(&self) -> f64 {
        self.s1
    }

    pub fn s2(&self) -> f64 {
        self.s2
    }

    pub fn p1(&self) -> f64 {
        self.p1
    }

    pub fn p2(&self) -> f64 {
        self.p2
    }

    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    pub fn scale_interval(&self) -> Interval {
        Interval::new(self.s1, self.s2).normalized()
    }

    pub fn paint_interval(&self) -> Interval {
        Interval::new(self.p1, self.p2).normalized()
    }
}

/// `steps` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}
