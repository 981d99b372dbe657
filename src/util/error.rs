//! Error types for nmsfilter.

use thiserror::Error;

/// Result alias for nmsfilter operations.
pub type NmsResult<T> = std::result::Result<T, NmsError>;

/// Errors returned by the fallible stages around suppression.
///
/// Suppression itself never fails; these cover decoding raw model output,
/// rescaling and configuration checks.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NmsError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The buffer length does not match the declared tensor shape.
    #[error("buffer of length {len} does not match shape {rows}x{cols}")]
    ShapeMismatch { len: usize, rows: usize, cols: usize },
    /// Neither tensor axis carries the expected `4 + classes` features.
    #[error("output shape {rows}x{cols} has no axis of {expected} features")]
    FeatureCountMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
    },
    /// A threshold is NaN or infinite.
    #[error("threshold {name} must be finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// Image or model input dimensions are zero.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
