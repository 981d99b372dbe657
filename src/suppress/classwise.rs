//! Per-class suppression built on top of the class-agnostic core.
//!
//! Detections are partitioned by `class_id`, each partition is suppressed on
//! its own, and the survivors are merged by descending score. Ties across
//! classes resolve to the lower input index.

use crate::detection::Detection;
use crate::suppress::{rank_key, suppress_indices};
use std::collections::BTreeMap;

/// Groups input indices by class, preserving input order within a class.
pub(crate) fn partition_by_class(detections: &[Detection]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, det) in detections.iter().enumerate() {
        groups.entry(det.class_id).or_default().push(idx);
    }
    groups
}

/// Suppresses one class group and maps the result back to input indices.
pub(crate) fn suppress_group(
    detections: &[Detection],
    group: &[usize],
    iou_threshold: f32,
) -> Vec<usize> {
    let subset: Vec<Detection> = group.iter().map(|&idx| detections[idx]).collect();
    suppress_indices(&subset, iou_threshold)
        .into_iter()
        .map(|local| group[local])
        .collect()
}

/// Orders kept indices by descending score, then by input index.
pub(crate) fn merge_kept(detections: &[Detection], kept: &mut [usize]) {
    kept.sort_by(|&a, &b| {
        rank_key(detections[b].score)
            .total_cmp(&rank_key(detections[a].score))
            .then_with(|| a.cmp(&b))
    });
}

/// Runs greedy NMS independently within each class and returns input indices.
pub fn suppress_per_class_indices(detections: &[Detection], iou_threshold: f32) -> Vec<usize> {
    let mut kept = Vec::new();
    for group in partition_by_class(detections).values() {
        kept.extend(suppress_group(detections, group, iou_threshold));
    }
    merge_kept(detections, &mut kept);
    kept
}

/// Runs greedy NMS independently within each class.
///
/// Detections of different classes never suppress each other. The result is
/// ordered by descending score across all classes.
pub fn suppress_per_class(detections: &[Detection], iou_threshold: f32) -> Vec<Detection> {
    suppress_per_class_indices(detections, iou_threshold)
        .into_iter()
        .map(|idx| detections[idx])
        .collect()
}
