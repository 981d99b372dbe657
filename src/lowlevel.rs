//! Low-level building blocks for custom post-processing pipelines.
//!
//! These expose index-returning suppression and the raw head view for
//! callers that keep detections in their own storage. Most users should
//! prefer [`suppress`](crate::suppress()) or [`PostProcessor`](crate::PostProcessor).

pub use crate::decode::{HeadLayout, HeadOutput};
pub use crate::suppress::{suppress_indices, suppress_per_class_indices};

#[cfg(feature = "rayon")]
pub use crate::suppress::rayon::suppress_per_class_indices_par;
