//! Decoding of raw YOLOv8-style head output into candidate detections.
//!
//! Each anchor carries `cx, cy, w, h` followed by one score per class. There
//! is no separate objectness term: the detection score is the best class
//! score and the class is its index.

mod layout;

pub use layout::{HeadLayout, HeadOutput};

use crate::detection::Detection;
use crate::geometry::Rect;
use crate::trace::{trace_event, trace_span};
use crate::util::{NmsError, NmsResult};

/// Decodes every anchor whose best class score is `>= score_threshold`.
///
/// Ties between class scores resolve to the lowest class index. Output order
/// follows anchor order.
pub fn decode_yolov8(head: &HeadOutput<'_>, score_threshold: f32) -> Vec<Detection> {
    let _span = trace_span!("decode", anchors = head.anchors()).entered();

    let mut out = Vec::new();
    for anchor in 0..head.anchors() {
        let mut class_id = 0usize;
        let mut score = head.value(anchor, 4);
        for class in 1..head.num_classes() {
            let value = head.value(anchor, 4 + class);
            if value > score {
                score = value;
                class_id = class;
            }
        }
        if score >= score_threshold {
            let rect = Rect::from_center(
                head.value(anchor, 0),
                head.value(anchor, 1),
                head.value(anchor, 2),
                head.value(anchor, 3),
            );
            out.push(Detection::from_rect(rect, score, class_id));
        }
    }

    trace_event!("decode_done", candidates = out.len());
    out
}

/// Keeps detections with `score >= score_threshold`, preserving order.
pub fn filter_by_score(detections: &[Detection], score_threshold: f32) -> Vec<Detection> {
    detections
        .iter()
        .copied()
        .filter(|det| det.score >= score_threshold)
        .collect()
}

/// Maps detections from model input space `from` to image space `to`.
///
/// Both sizes are `(width, height)` in pixels.
pub fn rescale(
    detections: &[Detection],
    from: (usize, usize),
    to: (usize, usize),
) -> NmsResult<Vec<Detection>> {
    for &(width, height) in &[from, to] {
        if width == 0 || height == 0 {
            return Err(NmsError::InvalidDimensions { width, height });
        }
    }
    let sx = to.0 as f32 / from.0 as f32;
    let sy = to.1 as f32 / from.1 as f32;
    Ok(detections
        .iter()
        .map(|det| Detection {
            rect: det.rect.scaled(sx, sy),
            ..*det
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{decode_yolov8, filter_by_score, rescale, HeadOutput};
    use crate::detection::Detection;
    use crate::geometry::Rect;
    use crate::util::NmsError;

    #[test]
    fn class_score_ties_pick_lowest_index() {
        let data = [10.0, 10.0, 4.0, 4.0, 0.6, 0.6, 0.1];
        let head = HeadOutput::new(&data, 1, 7, 3).unwrap();
        let dets = decode_yolov8(&head, 0.5);
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 0);
        assert_eq!(dets[0].rect, Rect::new(8.0, 8.0, 12.0, 12.0));
    }

    #[test]
    fn nan_scores_are_dropped() {
        let data = [10.0, 10.0, 4.0, 4.0, f32::NAN];
        let head = HeadOutput::new(&data, 1, 5, 1).unwrap();
        assert!(decode_yolov8(&head, 0.0).is_empty());
    }

    #[test]
    fn filter_by_score_is_inclusive() {
        let dets = [
            Detection::new(0.0, 0.0, 1.0, 1.0, 0.25),
            Detection::new(0.0, 0.0, 1.0, 1.0, 0.2),
        ];
        assert_eq!(filter_by_score(&dets, 0.25), vec![dets[0]]);
    }

    #[test]
    fn rescale_rejects_zero_sizes() {
        let err = rescale(&[], (640, 0), (1280, 720)).err().unwrap();
        assert_eq!(
            err,
            NmsError::InvalidDimensions {
                width: 640,
                height: 0,
            }
        );
    }
}
