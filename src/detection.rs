//! Detection value type.

use crate::geometry::Rect;

/// A single candidate object: rectangle, confidence and class.
///
/// Detections are plain `Copy` values; suppression reads them and returns
/// fresh copies, never references into the caller's buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Bounding rectangle in pixel space.
    pub rect: Rect,
    /// Confidence used for ranking, nominally in `[0, 1]`.
    pub score: f32,
    /// Class index. Ignored by class-agnostic suppression.
    pub class_id: usize,
}

impl Detection {
    /// Creates a class-0 detection from corner coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            rect: Rect::new(x1, y1, x2, y2),
            score,
            class_id: 0,
        }
    }

    /// Creates a detection from an existing rectangle.
    pub fn from_rect(rect: Rect, score: f32, class_id: usize) -> Self {
        Self {
            rect,
            score,
            class_id,
        }
    }

    /// Returns a copy with the given class index.
    pub fn with_class(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    /// Returns the clamped rectangle area.
    pub fn area(&self) -> f32 {
        self.rect.area()
    }
}
