// File: crates/plot-core/src/spline.rs
// Summary: Cubic Hermite spline interpolation: per-segment polynomials,
//          sampled polygons and cubic-Bezier paths.

use crate::error::PlotError;
use crate::geometry::Point;

/// Cubic polynomial `a*t^3 + b*t^2 + c*t + d` over the local parameter
/// `t = x - x1` of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SplinePolynom {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl SplinePolynom {
    pub fn value(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    pub fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    pub fn curvature(&self, t: f64) -> f64 {
        6.0 * self.a * t + 2.0 * self.b
    }

    /// Hermite segment from endpoints and endpoint slopes.
    pub fn from_slopes(p1: Point, m1: f64, p2: Point, m2: f64) -> Self {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        let a = (m1 + m2 - 2.0 * dy / dx) / (dx * dx);
        let b = (m2 - m1 - 3.0 * a * dx * dx) / (2.0 * dx);
        Self { a, b, c: m1, d: p1.y }
    }

    /// Hermite segment from endpoints and endpoint curvatures.
    pub fn from_curvatures(p1: Point, cv1: f64, p2: Point, cv2: f64) -> Self {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        let a = (cv2 - cv1) / (6.0 * dx);
        let b = 0.5 * cv1;
        let c = dy / dx - (a * dx + b) * dx;
        Self { a, b, c, d: p1.y }
    }
}

/// Slopes of a segment polynomial at both endpoints.
pub fn to_slopes(dx: f64, polynom: &SplinePolynom) -> (f64, f64) {
    (polynom.c, polynom.slope(dx))
}

/// Curvatures at both segment endpoints: `cv1 = 2b`, `cv2 = 2(3a*dx + b)`.
pub fn to_curvatures(dx: f64, a: f64, b: f64) -> (f64, f64) {
    (2.0 * b, 2.0 * (3.0 * a * dx + b))
}

/// Curvatures of the Hermite segment through `p1`, `p2` with slopes `m1`, `m2`.
pub fn to_curvatures_from_slopes(p1: Point, m1: f64, p2: Point, m2: f64) -> (f64, f64) {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let v = 3.0 * dy / dx - m1 - m2;
    let k = 2.0 / dx;
    (k * (v - m1), k * (m2 - v))
}

/// Element of a vector path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// Vector path made of move/line/cubic elements, consumed by backends
/// with native curve support.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurvePath {
    pub elements: Vec<PathElement>,
}

impl CurvePath {
    /// Append a cubic segment through `p1`/`p2` with endpoint slopes,
    /// control points offset by a third of the x distance.
    pub fn cubic_to(&mut self, p1: Point, m1: f64, p2: Point, m2: f64) {
        let dx = (p2.x - p1.x) / 3.0;
        self.elements.push(PathElement::CubicTo(
            Point::new(p1.x + dx, p1.y + m1 * dx),
            Point::new(p2.x - dx, p2.y - m2 * dx),
            p2,
        ));
    }
}

/// Computes one slope per control point; the Hermite core turns those
/// into segment polynomials.
pub trait SlopeStrategy {
    /// One slope per point; fewer than two points yield an empty vec.
    fn slopes(&self, points: &[Point]) -> Vec<f64>;
}

/// Natural spline boundary: second derivative zero at both ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalSlopes;

/// Caller-supplied boundary slopes (clamped spline).
#[derive(Clone, Copy, Debug)]
pub struct ClampedSlopes {
    pub start: f64,
    pub end: f64,
}

impl SlopeStrategy for NaturalSlopes {
    fn slopes(&self, points: &[Point]) -> Vec<f64> {
        let n = points.len();
        if n < 2 {
            return Vec::new();
        }
        let mut curvatures = vec![0.0; n];
        if n > 2 {
            // Tridiagonal system over the interior curvatures, the two
            // boundary curvatures stay zero.
            let m = n - 2;
            let mut sub = vec![0.0; m];
            let mut diag = vec![0.0; m];
            let mut sup = vec![0.0; m];
            let mut rhs = vec![0.0; m];
            for i in 0..m {
                let h0 = points[i + 1].x - points[i].x;
                let h1 = points[i + 2].x - points[i + 1].x;
                let s0 = (points[i + 1].y - points[i].y) / h0;
                let s1 = (points[i + 2].y - points[i + 1].y) / h1;
                sub[i] = h0;
                diag[i] = 2.0 * (h0 + h1);
                sup[i] = h1;
                rhs[i] = 6.0 * (s1 - s0);
            }
            let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs);
            curvatures[1..=m].copy_from_slice(&inner);
        }
        slopes_from_curvatures(points, &curvatures)
    }
}

impl SlopeStrategy for ClampedSlopes {
    fn slopes(&self, points: &[Point]) -> Vec<f64> {
        let n = points.len();
        if n < 2 {
            return Vec::new();
        }
        let mut sub = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut sup = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        let h0 = points[1].x - points[0].x;
        let s0 = (points[1].y - points[0].y) / h0;
        diag[0] = 2.0 * h0;
        sup[0] = h0;
        rhs[0] = 6.0 * (s0 - self.start);

        for i in 1..n - 1 {
            let ha = points[i].x - points[i - 1].x;
            let hb = points[i + 1].x - points[i].x;
            let sa = (points[i].y - points[i - 1].y) / ha;
            let sb = (points[i + 1].y - points[i].y) / hb;
            sub[i] = ha;
            diag[i] = 2.0 * (ha + hb);
            sup[i] = hb;
            rhs[i] = 6.0 * (sb - sa);
        }

        let hn = points[n - 1].x - points[n - 2].x;
        let sn = (points[n - 1].y - points[n - 2].y) / hn;
        sub[n - 1] = hn;
        diag[n - 1] = 2.0 * hn;
        rhs[n - 1] = 6.0 * (self.end - sn);

        let curvatures = solve_tridiagonal(&sub, &diag, &sup, &rhs);
        slopes_from_curvatures(points, &curvatures)
    }
}

// Thomas algorithm; diag is assumed diagonally dominant, which holds for
// the spline systems built above.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = if i + 1 < n { sup[i] / denom } else { 0.0 };
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
    }
    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    x
}

fn slopes_from_curvatures(points: &[Point], curvatures: &[f64]) -> Vec<f64> {
    let n = points.len();
    let mut slopes = Vec::with_capacity(n);
    for i in 0..n - 1 {
        let h = points[i + 1].x - points[i].x;
        let s = (points[i + 1].y - points[i].y) / h;
        slopes.push(s - h * (2.0 * curvatures[i] + curvatures[i + 1]) / 6.0);
    }
    let h = points[n - 1].x - points[n - 2].x;
    let s = (points[n - 1].y - points[n - 2].y) / h;
    slopes.push(s + h * (curvatures[n - 2] + 2.0 * curvatures[n - 1]) / 6.0);
    slopes
}

/// Hermite spline interpolator over an ordered point sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct HermiteSpline<S> {
    strategy: S,
}

impl<S: SlopeStrategy> HermiteSpline<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// One polynomial per segment, `points.len() - 1` in total.
    pub fn polynoms(&self, points: &[Point]) -> Result<Vec<SplinePolynom>, PlotError> {
        validate(points)?;
        let slopes = self.strategy.slopes(points);
        Ok(points
            .windows(2)
            .zip(slopes.windows(2))
            .map(|(p, m)| SplinePolynom::from_slopes(p[0], m[0], p[1], m[1]))
            .collect())
    }

    /// Sample the spline into a polygon of `num_points` vertices evenly
    /// spaced in x. For backends without native cubic path support.
    pub fn polygon(&self, points: &[Point], num_points: usize) -> Result<Vec<Point>, PlotError> {
        let polynoms = self.polynoms(points)?;
        let num_points = num_points.max(2);

        let x_first = points[0].x;
        let x_last = points[points.len() - 1].x;
        let delta = (x_last - x_first) / (num_points as f64 - 1.0);

        let mut out = Vec::with_capacity(num_points);
        let mut seg = 0usize;
        for i in 0..num_points - 1 {
            let x = x_first + delta * i as f64;
            while seg + 1 < polynoms.len() && x >= points[seg + 1].x {
                seg += 1;
            }
            out.push(Point::new(x, polynoms[seg].value(x - points[seg].x)));
        }
        out.push(points[points.len() - 1]);
        Ok(out)
    }

    /// Vector path emitting one cubic-Bezier per segment.
    pub fn path(&self, points: &[Point]) -> Result<CurvePath, PlotError> {
        validate(points)?;
        let slopes = self.strategy.slopes(points);

        let mut path = CurvePath::default();
        path.elements.push(PathElement::MoveTo(points[0]));
        for i in 0..points.len() - 1 {
            path.cubic_to(points[i], slopes[i], points[i + 1], slopes[i + 1]);
        }
        Ok(path)
    }

    /// Path through points that are not monotonic in x, parameterized by
    /// point index: x and y are interpolated independently.
    pub fn parametric_path(&self, points: &[Point]) -> Result<CurvePath, PlotError> {
        if points.len() < 2 {
            return Err(PlotError::InvalidControlPoints("fewer than 2 points"));
        }
        let xs: Vec<Point> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(i as f64, p.x))
            .collect();
        let ys: Vec<Point> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(i as f64, p.y))
            .collect();
        let mx = self.strategy.slopes(&xs);
        let my = self.strategy.slopes(&ys);

        let mut path = CurvePath::default();
        path.elements.push(PathElement::MoveTo(points[0]));
        for i in 0..points.len() - 1 {
            // parameter step per segment is 1, control offset 1/3
            let p1 = points[i];
            let p2 = points[i + 1];
            path.elements.push(PathElement::CubicTo(
                Point::new(p1.x + mx[i] / 3.0, p1.y + my[i] / 3.0),
                Point::new(p2.x - mx[i + 1] / 3.0, p2.y - my[i + 1] / 3.0),
                p2,
            ));
        }
        Ok(path)
    }
}

fn validate(points: &[Point]) -> Result<(), PlotError> {
    if points.len() < 2 {
        return Err(PlotError::InvalidControlPoints("fewer than 2 points"));
    }
    if points.windows(2).any(|w| w[1].x <= w[0].x) {
        return Err(PlotError::InvalidControlPoints("x values not strictly increasing"));
    }
    Ok(())
}
