//! Axis-aligned rectangles and the IoU overlap metric.
//!
//! Coordinates are corner form `(x1, y1, x2, y2)` in pixel space. Rectangles
//! with `x2 < x1` or `y2 < y1` are accepted and treated as having zero extent
//! along the inverted axis, so they contribute no area to any overlap.

/// Axis-aligned rectangle in corner form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl Rect {
    /// Creates a rectangle from its corners.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a rectangle from a centre point and full width/height.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Returns the width, clamped to zero for inverted rectangles.
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Returns the height, clamped to zero for inverted rectangles.
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Returns the area using clamped extents.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the area shared with `other`, zero when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0)
    }

    /// Returns a copy with x scaled by `sx` and y scaled by `sy`.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::new(self.x1 * sx, self.y1 * sy, self.x2 * sx, self.y2 * sy)
    }
}

/// Intersection-over-union of two rectangles.
///
/// Returns a value in `[0, 1]`. When the union has no positive area (both
/// rectangles degenerate, or a coordinate is NaN) the result is `0.0`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn overlap(a: &Rect, b: &Rect) -> f32 {
    let intersection = a.intersection_area(b);
    let union = a.area() + b.area() - intersection;
    // Negated form so a NaN union (e.g. infinite * zero extent) maps to 0.
    if !(union > 0.0) {
        return 0.0;
    }
    intersection / union
}
