//! Greedy non-maximum suppression.
//!
//! Detections are ranked by descending score and visited in that order. Each
//! visited detection that has not been suppressed is kept, and every later
//! detection whose IoU with it is not strictly below the threshold is dropped.
//! Equal scores keep their input order, so the output is fully determined by
//! the input sequence.
//!
//! Suppression is class-agnostic: boxes of different classes at the same
//! location suppress each other. Callers that want per-class behaviour can
//! partition first or use [`suppress_per_class`], which does exactly that.

use crate::detection::Detection;
use crate::geometry::overlap;
use crate::trace::{trace_event, trace_span};
use std::cmp::Ordering;

mod classwise;
#[cfg(feature = "rayon")]
pub mod rayon;

pub use classwise::{suppress_per_class, suppress_per_class_indices};

/// Score used for ranking. Adding `0.0` folds `-0.0` into `0.0` so signed
/// zeros tie, while `total_cmp` still gives NaN a fixed place.
#[inline]
pub(crate) fn rank_key(score: f32) -> f32 {
    score + 0.0
}

fn score_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    rank_key(b.score).total_cmp(&rank_key(a.score))
}

/// Returns input indices ordered by descending score.
///
/// The sort is stable, so equal scores keep their input order.
pub(crate) fn rank_by_score(detections: &[Detection]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| score_cmp_desc(&detections[a], &detections[b]));
    order
}

/// Runs greedy NMS and returns the kept input indices in selection order.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn suppress_indices(detections: &[Detection], iou_threshold: f32) -> Vec<usize> {
    let _span = trace_span!("suppress", candidates = detections.len()).entered();

    let order = rank_by_score(detections);
    let mut suppressed = vec![false; order.len()];
    let mut kept = Vec::new();

    for (pos, &idx) in order.iter().enumerate() {
        if suppressed[pos] {
            continue;
        }
        kept.push(idx);
        let best = &detections[idx].rect;
        for (later, &other) in order.iter().enumerate().skip(pos + 1) {
            if suppressed[later] {
                continue;
            }
            // Survivors need IoU strictly below the threshold; a NaN
            // threshold therefore suppresses everything after the first pick.
            if !(overlap(best, &detections[other].rect) < iou_threshold) {
                suppressed[later] = true;
            }
        }
    }

    trace_event!("suppress_done", kept = kept.len());
    kept
}

/// Runs greedy, class-agnostic NMS.
///
/// Returns a subset of `detections` ordered by descending score in which no
/// two detections have IoU `>= iou_threshold`. The threshold is not
/// validated: values `<= 0` keep only the top detection and values above `1`
/// keep everything.
pub fn suppress(detections: &[Detection], iou_threshold: f32) -> Vec<Detection> {
    suppress_indices(detections, iou_threshold)
        .into_iter()
        .map(|idx| detections[idx])
        .collect()
}

/// Reusable suppression settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suppressor {
    /// IoU at or above which the lower-scored detection is dropped.
    pub iou_threshold: f32,
}

impl Suppressor {
    /// Creates a suppressor with the given IoU threshold.
    pub fn new(iou_threshold: f32) -> Self {
        Self { iou_threshold }
    }

    /// Applies [`suppress`] with this threshold.
    pub fn run(&self, detections: &[Detection]) -> Vec<Detection> {
        suppress(detections, self.iou_threshold)
    }

    /// Applies [`suppress_indices`] with this threshold.
    pub fn run_indices(&self, detections: &[Detection]) -> Vec<usize> {
        suppress_indices(detections, self.iou_threshold)
    }
}
