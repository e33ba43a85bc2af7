// File: crates/plot-core/src/geometry.rs
// Summary: Lightweight geometry types and polygon clipping helpers.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Axis-aligned rectangle, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// A rect is valid when it is finite and has positive area.
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.right > self.left
            && self.bottom > self.top
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn contains_rect(&self, r: &Rect) -> bool {
        r.left >= self.left && r.right <= self.right && r.top >= self.top && r.bottom <= self.bottom
    }

    pub fn intersects(&self, r: &Rect) -> bool {
        self.left <= r.right && r.left <= self.right && self.top <= r.bottom && r.top <= self.bottom
    }

    /// Intersection; may come out invalid when the rects do not overlap.
    pub fn intersected(&self, r: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left.max(r.left),
            self.top.max(r.top),
            self.right.min(r.right),
            self.bottom.min(r.bottom),
        )
    }

    pub fn adjusted(&self, dl: f64, dt: f64, dr: f64, db: f64) -> Rect {
        Rect::from_ltrb(self.left + dl, self.top + dt, self.right + dr, self.bottom + db)
    }

    pub fn scaled(&self, f: f64) -> Rect {
        Rect::from_ltrb(self.left * f, self.top * f, self.right * f, self.bottom * f)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Closed outline of a rect as a five point chain (last == first).
pub fn rect_outline(r: Rect) -> [Point; 5] {
    [
        Point::new(r.left, r.top),
        Point::new(r.right, r.top),
        Point::new(r.right, r.bottom),
        Point::new(r.left, r.bottom),
        Point::new(r.left, r.top),
    ]
}

/// Sutherland-Hodgman clipping of a point chain against a rect.
///
/// With `closed` the implicit closing edge is clipped as well; without it
/// the input is treated as an open polyline.
pub fn clip_polygon(clip: &Rect, points: &[Point], closed: bool) -> Vec<Point> {
    let mut out = clip_edge(points, closed, |p| p.x >= clip.left, |a, b| {
        cross_x(a, b, clip.left)
    });
    out = clip_edge(&out, closed, |p| p.x <= clip.right, |a, b| cross_x(a, b, clip.right));
    out = clip_edge(&out, closed, |p| p.y >= clip.top, |a, b| cross_y(a, b, clip.top));
    out = clip_edge(&out, closed, |p| p.y <= clip.bottom, |a, b| cross_y(a, b, clip.bottom));
    out
}

fn cross_x(a: Point, b: Point, x: f64) -> Point {
    let t = (x - a.x) / (b.x - a.x);
    Point::new(x, a.y + t * (b.y - a.y))
}

fn cross_y(a: Point, b: Point, y: f64) -> Point {
    let t = (y - a.y) / (b.y - a.y);
    Point::new(a.x + t * (b.x - a.x), y)
}

fn clip_edge(
    points: &[Point],
    closed: bool,
    inside: impl Fn(Point) -> bool,
    intersect: impl Fn(Point, Point) -> Point,
) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(points.len() + 4);

    if closed {
        let n = points.len();
        for i in 0..n {
            let a = points[(i + n - 1) % n];
            let b = points[i];
            push_clipped(&mut out, a, b, &inside, &intersect);
        }
    } else {
        if inside(points[0]) {
            out.push(points[0]);
        }
        for w in points.windows(2) {
            push_clipped(&mut out, w[0], w[1], &inside, &intersect);
        }
    }
    out
}

fn push_clipped(
    out: &mut Vec<Point>,
    a: Point,
    b: Point,
    inside: &impl Fn(Point) -> bool,
    intersect: &impl Fn(Point, Point) -> Point,
) {
    if inside(b) {
        if !inside(a) {
            out.push(intersect(a, b));
        }
        out.push(b);
    } else if inside(a) {
        out.push(intersect(a, b));
    }
}
