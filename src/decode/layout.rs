//! Tensor layout detection for detection-head output.

use crate::util::{NmsError, NmsResult};

/// Axis order of a 2D head output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadLayout {
    /// One row per anchor, `features` columns (`[N, 4 + C]`).
    AnchorMajor,
    /// One row per feature, one column per anchor (`[4 + C, N]`).
    FeatureMajor,
}

/// Borrowed view over a dense, row-major head output.
#[derive(Clone, Copy, Debug)]
pub struct HeadOutput<'a> {
    data: &'a [f32],
    layout: HeadLayout,
    anchors: usize,
    features: usize,
}

impl<'a> HeadOutput<'a> {
    /// Wraps `data` with shape `(rows, cols)` for a head with `num_classes`.
    ///
    /// A `(4 + C, N)` tensor with `N > 4 + C` is read feature-major; a
    /// `(N, 4 + C)` tensor is read anchor-major. Anything else is rejected.
    pub fn new(data: &'a [f32], rows: usize, cols: usize, num_classes: usize) -> NmsResult<Self> {
        let features = feature_count(num_classes)?;
        let expected_len = rows
            .checked_mul(cols)
            .ok_or(NmsError::ShapeMismatch {
                len: data.len(),
                rows,
                cols,
            })?;
        if data.len() != expected_len {
            return Err(NmsError::ShapeMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }

        let (layout, anchors) = if rows == features && cols > features {
            (HeadLayout::FeatureMajor, cols)
        } else if cols == features {
            (HeadLayout::AnchorMajor, rows)
        } else {
            return Err(NmsError::FeatureCountMismatch {
                rows,
                cols,
                expected: features,
            });
        };

        Ok(Self {
            data,
            layout,
            anchors,
            features,
        })
    }

    /// Wraps a flat anchor-major buffer of `N * (4 + C)` values.
    pub fn from_flat(data: &'a [f32], num_classes: usize) -> NmsResult<Self> {
        let features = feature_count(num_classes)?;
        if data.len() % features != 0 {
            return Err(NmsError::FeatureCountMismatch {
                rows: 1,
                cols: data.len(),
                expected: features,
            });
        }
        Self::new(data, data.len() / features, features, num_classes)
    }

    /// Returns the detected axis order.
    pub fn layout(&self) -> HeadLayout {
        self.layout
    }

    /// Returns the number of anchors (candidate boxes).
    pub fn anchors(&self) -> usize {
        self.anchors
    }

    /// Returns the number of features per anchor (`4 + C`).
    pub fn features(&self) -> usize {
        self.features
    }

    /// Returns the number of class scores per anchor.
    pub fn num_classes(&self) -> usize {
        self.features - 4
    }

    /// Returns feature `feature` of anchor `anchor`.
    ///
    /// Both indices must be in range; callers iterate `0..anchors()` and
    /// `0..features()`.
    #[inline]
    pub fn value(&self, anchor: usize, feature: usize) -> f32 {
        match self.layout {
            HeadLayout::AnchorMajor => self.data[anchor * self.features + feature],
            HeadLayout::FeatureMajor => self.data[feature * self.anchors + anchor],
        }
    }
}

/// Returns `4 + num_classes`, rejecting empty and overflowing class counts.
fn feature_count(num_classes: usize) -> NmsResult<usize> {
    if num_classes == 0 {
        return Err(NmsError::InvalidInput("num_classes must be at least 1"));
    }
    num_classes
        .checked_add(4)
        .ok_or(NmsError::InvalidInput("num_classes is too large"))
}
