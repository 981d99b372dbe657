//! Rayon-parallel suppression helpers (feature-gated).
//!
//! A single greedy pass is inherently sequential, so parallelism is applied
//! across independent sets: whole images in a batch, or class partitions.
//! Results are identical to the sequential functions.

use crate::detection::Detection;
use crate::suppress::classwise::{merge_kept, partition_by_class, suppress_group};
use crate::suppress::suppress;
use rayon::prelude::*;

/// Suppresses each detection set of a batch in parallel.
pub fn suppress_batch_par(batch: &[Vec<Detection>], iou_threshold: f32) -> Vec<Vec<Detection>> {
    batch
        .par_iter()
        .map(|detections| suppress(detections, iou_threshold))
        .collect()
}

/// Parallel counterpart of `suppress_per_class_indices`.
pub fn suppress_per_class_indices_par(detections: &[Detection], iou_threshold: f32) -> Vec<usize> {
    let groups: Vec<Vec<usize>> = partition_by_class(detections).into_values().collect();
    let mut kept: Vec<usize> = groups
        .par_iter()
        .flat_map_iter(|group| suppress_group(detections, group, iou_threshold))
        .collect();
    merge_kept(detections, &mut kept);
    kept
}

/// Per-class suppression with class partitions processed in parallel.
pub fn suppress_per_class_par(detections: &[Detection], iou_threshold: f32) -> Vec<Detection> {
    suppress_per_class_indices_par(detections, iou_threshold)
        .into_iter()
        .map(|idx| detections[idx])
        .collect()
}
