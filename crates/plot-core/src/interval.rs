// File: crates/plot-core/src/interval.rs
// Summary: Closed interval of doubles used for data and paint ranges.

/// Closed interval `[min, max]`.
///
/// The default value is deliberately invalid (`min > max`) so that an
/// untouched interval never passes validity checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Default for Interval {
    fn default() -> Self {
        Self { min: 0.0, max: -1.0 }
    }
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Swap the bounds when given in descending order.
    pub fn normalized(self) -> Self {
        if self.min > self.max {
            Self { min: self.max, max: self.min }
        } else {
            self
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn is_empty(&self) -> bool {
        !self.is_valid() || self.width() <= 0.0
    }

    pub fn contains(&self, v: f64) -> bool {
        let n = self.normalized();
        v >= n.min && v <= n.max
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.is_valid() && b.is_valid() && a.min <= b.max && b.min <= a.max
    }

    pub fn united(&self, other: &Interval) -> Interval {
        if !self.is_valid() {
            return *other;
        }
        if !other.is_valid() {
            return *self;
        }
        Interval::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Grow the interval so that it contains `v`.
    pub fn extended(&self, v: f64) -> Interval {
        if !self.is_valid() {
            return Interval::new(v, v);
        }
        Interval::new(self.min.min(v), self.max.max(v))
    }
}
