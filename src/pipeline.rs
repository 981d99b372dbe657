//! End-to-end post-processing of detector output.
//!
//! `PostProcessor` chains head decoding, the confidence filter, suppression,
//! truncation and rescaling. Unlike the bare [`suppress`](crate::suppress())
//! function, its configuration is validated before use.

use crate::decode::{decode_yolov8, filter_by_score, rescale, HeadOutput};
use crate::detection::Detection;
#[cfg(feature = "rayon")]
use crate::suppress::rayon::suppress_per_class_indices_par;
use crate::suppress::{suppress_indices, suppress_per_class_indices};
use crate::trace::{trace_event, trace_span};
use crate::util::{NmsError, NmsResult};

/// Configuration for the post-processing pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct PostProcessConfig {
    /// Minimum class score for a candidate to enter suppression.
    pub score_threshold: f32,
    /// IoU at or above which the lower-scored detection is dropped.
    pub iou_threshold: f32,
    /// Suppress within each class instead of across all classes.
    pub class_aware: bool,
    /// Keep at most this many detections after suppression.
    pub max_detections: Option<usize>,
    /// Suppress class partitions on the rayon pool.
    ///
    /// Only read when `class_aware` is set and the `rayon` feature is
    /// enabled; otherwise suppression runs sequentially. Output is the same
    /// either way.
    pub parallel: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.25,
            iou_threshold: 0.45,
            class_aware: false,
            max_detections: None,
            parallel: false,
        }
    }
}

impl PostProcessConfig {
    /// Checks that thresholds are finite and the detection cap is non-zero.
    pub fn validate(&self) -> NmsResult<()> {
        if !self.score_threshold.is_finite() {
            return Err(NmsError::InvalidThreshold {
                name: "score_threshold",
                value: self.score_threshold,
            });
        }
        if !self.iou_threshold.is_finite() {
            return Err(NmsError::InvalidThreshold {
                name: "iou_threshold",
                value: self.iou_threshold,
            });
        }
        if self.max_detections == Some(0) {
            return Err(NmsError::InvalidInput("max_detections must be at least 1"));
        }
        Ok(())
    }
}

/// Decodes, filters and suppresses detector output for a fixed model shape.
#[derive(Clone, Debug)]
pub struct PostProcessor {
    num_classes: usize,
    input_size: (usize, usize),
    cfg: PostProcessConfig,
}

impl PostProcessor {
    /// Creates a post-processor for a model with `num_classes` classes and
    /// an input size of `(width, height)` pixels.
    pub fn new(num_classes: usize, input_size: (usize, usize)) -> Self {
        Self {
            num_classes,
            input_size,
            cfg: PostProcessConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: PostProcessConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostProcessConfig {
        &self.cfg
    }

    /// Processes one raw head output of shape `(rows, cols)`.
    ///
    /// Returned detections are in image space, `image_size` being the
    /// `(width, height)` of the source image.
    pub fn process(
        &self,
        output: &[f32],
        shape: (usize, usize),
        image_size: (usize, usize),
    ) -> NmsResult<Vec<Detection>> {
        self.cfg.validate()?;
        let _span = trace_span!("post_process", rows = shape.0, cols = shape.1).entered();

        let head = HeadOutput::new(output, shape.0, shape.1, self.num_classes)?;
        let candidates = decode_yolov8(&head, self.cfg.score_threshold);
        let kept = self.suppress_and_truncate(&candidates);
        rescale(&kept, self.input_size, image_size)
    }

    /// Applies the confidence filter, suppression and truncation to
    /// already-decoded detections, without rescaling.
    pub fn filter(&self, detections: &[Detection]) -> NmsResult<Vec<Detection>> {
        self.cfg.validate()?;
        let _span = trace_span!("post_filter", candidates = detections.len()).entered();

        let candidates = filter_by_score(detections, self.cfg.score_threshold);
        Ok(self.suppress_and_truncate(&candidates))
    }

    fn suppress_and_truncate(&self, candidates: &[Detection]) -> Vec<Detection> {
        let mut kept = if self.cfg.class_aware {
            self.per_class_indices(candidates)
        } else {
            suppress_indices(candidates, self.cfg.iou_threshold)
        };
        if let Some(max) = self.cfg.max_detections {
            kept.truncate(max);
        }
        trace_event!(
            "post_process_kept",
            candidates = candidates.len(),
            kept = kept.len()
        );
        kept.into_iter().map(|idx| candidates[idx]).collect()
    }

    #[cfg(feature = "rayon")]
    fn per_class_indices(&self, candidates: &[Detection]) -> Vec<usize> {
        if self.cfg.parallel {
            return suppress_per_class_indices_par(candidates, self.cfg.iou_threshold);
        }
        suppress_per_class_indices(candidates, self.cfg.iou_threshold)
    }

    #[cfg(not(feature = "rayon"))]
    fn per_class_indices(&self, candidates: &[Detection]) -> Vec<usize> {
        suppress_per_class_indices(candidates, self.cfg.iou_threshold)
    }
}
