//! nmsfilter is a CPU-only post-processing filter for object detections.
//!
//! The core is greedy, class-agnostic non-maximum suppression over
//! [`Detection`] values using the IoU [`overlap`] metric. Around it the crate
//! offers a YOLOv8-style head decoder, a per-class suppression helper and a
//! validated [`PostProcessor`] pipeline, with optional parallelism across
//! independent detection sets via the `rayon` feature.

pub mod decode;
pub mod detection;
pub mod geometry;
pub mod lowlevel;
pub mod pipeline;
pub mod suppress;
mod trace;
pub mod util;

pub use decode::{decode_yolov8, filter_by_score, rescale, HeadLayout, HeadOutput};
pub use detection::Detection;
pub use geometry::{overlap, Rect};
pub use pipeline::{PostProcessConfig, PostProcessor};
pub use suppress::{suppress, suppress_indices, suppress_per_class, Suppressor};
pub use util::{NmsError, NmsResult};

#[cfg(feature = "rayon")]
pub use suppress::rayon::{suppress_batch_par, suppress_per_class_par};
