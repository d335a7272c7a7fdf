//! Geometry primitives used by the builder, renderer and hit-tester.
//!
//! All types are plain `f32` value types independent of any UI toolkit so that
//! the core can be exercised without a window. The `egui` viewer converts them
//! at the painting boundary.
//!
//! Coordinates follow screen conventions: `x` grows to the right, `y` grows
//! downwards, and a [`Rect`] is stored as its `min` (top-left) and `max`
//! (bottom-right) corners.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width, y + height),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }
    pub fn right(&self) -> f32 {
        self.max.x
    }
    pub fn top(&self) -> f32 {
        self.min.y
    }
    pub fn bottom(&self) -> f32 {
        self.max.y
    }
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// Border edges, clockwise.
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }

    /// The two diagonals, top-left → bottom-right and top-right → bottom-left.
    pub fn diagonals(&self) -> [Segment; 2] {
        let [a, b, c, d] = self.corners();
        [Segment::new(a, c), Segment::new(b, d)]
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Intersection test against a viewport: a corner of `self` lies inside the
    /// viewport, or one of the border edges of `self` crosses the viewport
    /// border. Does not cover the case where `self` swallows the viewport
    /// whole; see [`Rect::is_visible_in`].
    pub fn intersects_viewport(&self, viewport: &Rect) -> bool {
        if self.corners().iter().any(|c| viewport.contains(*c)) {
            return true;
        }
        let vp_edges = viewport.edges();
        self.edges()
            .iter()
            .any(|e| vp_edges.iter().any(|v| e.intersects_segment(v)))
    }

    /// Either intersects the viewport or fully contains it.
    pub fn is_visible_in(&self, viewport: &Rect) -> bool {
        self.intersects_viewport(viewport) || self.contains_rect(viewport)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.center.distance_sq(p) <= self.radius * self.radius
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_min_max(
            Point::new(self.center.x - self.radius, self.center.y - self.radius),
            Point::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length_sq(&self) -> f32 {
        self.a.distance_sq(self.b)
    }

    pub fn is_vertical(&self) -> bool {
        self.a.x == self.b.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.a.y == self.b.y
    }

    /// Proper or touching intersection of two segments (parametric form).
    pub fn intersects_segment(&self, other: &Segment) -> bool {
        let r = Point::new(self.b.x - self.a.x, self.b.y - self.a.y);
        let s = Point::new(other.b.x - other.a.x, other.b.y - other.a.y);
        let denom = r.x * s.y - r.y * s.x;
        let qp = Point::new(other.a.x - self.a.x, other.a.y - self.a.y);
        if denom == 0.0 {
            // Parallel. Only collinear overlap counts.
            let cross = qp.x * r.y - qp.y * r.x;
            if cross != 0.0 {
                return false;
            }
            let (lo, hi) = (
                self.a.x.min(self.b.x).max(other.a.x.min(other.b.x)),
                self.a.x.max(self.b.x).min(other.a.x.max(other.b.x)),
            );
            let (lo_y, hi_y) = (
                self.a.y.min(self.b.y).max(other.a.y.min(other.b.y)),
                self.a.y.max(self.b.y).min(other.a.y.max(other.b.y)),
            );
            return lo <= hi && lo_y <= hi_y;
        }
        let t = (qp.x * s.y - qp.y * s.x) / denom;
        let u = (qp.x * r.y - qp.y * r.x) / denom;
        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }

    /// Whether this segment passes through `viewport` with neither endpoint
    /// needing to be inside it.
    ///
    /// Axis-aligned segments use an interval overlap test. Any other segment
    /// that crosses a rectangle separates its corners into two groups, so it
    /// must cross at least one of the two diagonals.
    pub fn intersects_viewport(&self, viewport: &Rect) -> bool {
        if self.is_vertical() {
            let x = self.a.x;
            let (y0, y1) = (self.a.y.min(self.b.y), self.a.y.max(self.b.y));
            return x >= viewport.left()
                && x <= viewport.right()
                && y1 >= viewport.top()
                && y0 <= viewport.bottom();
        }
        if self.is_horizontal() {
            let y = self.a.y;
            let (x0, x1) = (self.a.x.min(self.b.x), self.a.x.max(self.b.x));
            return y >= viewport.top()
                && y <= viewport.bottom()
                && x1 >= viewport.left()
                && x0 <= viewport.right();
        }
        viewport
            .diagonals()
            .iter()
            .any(|d| self.intersects_segment(d))
    }

    /// Either endpoint inside the viewport or the segment crosses it.
    pub fn is_visible_in(&self, viewport: &Rect) -> bool {
        viewport.contains(self.a) || viewport.contains(self.b) || self.intersects_viewport(viewport)
    }

    /// Squared distance from `p` to the closest point on the segment.
    pub fn distance_sq_to(&self, p: Point) -> f32 {
        let len_sq = self.length_sq();
        if len_sq == 0.0 {
            return self.a.distance_sq(p);
        }
        let t = ((p.x - self.a.x) * (self.b.x - self.a.x) + (p.y - self.a.y) * (self.b.y - self.a.y))
            / len_sq;
        let t = t.clamp(0.0, 1.0);
        let proj = Point::new(
            self.a.x + t * (self.b.x - self.a.x),
            self.a.y + t * (self.b.y - self.a.y),
        );
        proj.distance_sq(p)
    }
}
