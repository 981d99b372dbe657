//! Python bindings for the nmsfilter suppression library.
//!
//! Boxes cross the boundary either as `Detection` objects or as numpy arrays
//! (`(N, 4)` corner boxes plus `(N,)` scores), mirroring how detector output
//! is usually held on the Python side.

use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use nmsfilter::lowlevel::suppress_per_class_indices;
use nmsfilter::{
    Detection as RustDetection, HeadOutput, NmsError, PostProcessConfig, PostProcessor, Rect,
};

/// Convert an NmsError to a Python exception.
fn to_py_err(err: NmsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// One detection: corner box, score and class index.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    inner: RustDetection,
}

#[pymethods]
impl Detection {
    #[new]
    #[pyo3(signature = (x1, y1, x2, y2, score, class_id = 0))]
    fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32, class_id: usize) -> Self {
        Self {
            inner: RustDetection::from_rect(Rect::new(x1, y1, x2, y2), score, class_id),
        }
    }

    #[getter]
    fn x1(&self) -> f32 {
        self.inner.rect.x1
    }

    #[getter]
    fn y1(&self) -> f32 {
        self.inner.rect.y1
    }

    #[getter]
    fn x2(&self) -> f32 {
        self.inner.rect.x2
    }

    #[getter]
    fn y2(&self) -> f32 {
        self.inner.rect.y2
    }

    #[getter]
    fn score(&self) -> f32 {
        self.inner.score
    }

    #[getter]
    fn class_id(&self) -> usize {
        self.inner.class_id
    }

    fn __repr__(&self) -> String {
        let r = self.inner.rect;
        format!(
            "Detection(x1={:.1}, y1={:.1}, x2={:.1}, y2={:.1}, score={:.4}, class_id={})",
            r.x1, r.y1, r.x2, r.y2, self.inner.score, self.inner.class_id
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(inner: RustDetection) -> Self {
        Self { inner }
    }
}

/// Builds detections from an `(N, 4)` box array and `(N,)` score array.
fn detections_from_arrays(
    boxes: &PyReadonlyArray2<'_, f32>,
    scores: &PyReadonlyArray1<'_, f32>,
) -> PyResult<Vec<RustDetection>> {
    let shape = boxes.shape();
    if shape[1] != 4 {
        return Err(PyValueError::new_err("boxes must have shape (N, 4)"));
    }
    let count = shape[0];
    let scores = scores.as_slice()?;
    if scores.len() != count {
        return Err(PyValueError::new_err(
            "scores must have one entry per box",
        ));
    }
    let coords = boxes.as_slice()?;
    Ok(coords
        .chunks_exact(4)
        .zip(scores.iter())
        .map(|(c, &score)| RustDetection::new(c[0], c[1], c[2], c[3], score))
        .collect())
}

/// Intersection-over-union of two detections.
#[pyfunction]
fn iou(a: Detection, b: Detection) -> f32 {
    nmsfilter::overlap(&a.inner.rect, &b.inner.rect)
}

/// Class-agnostic NMS over numpy arrays.
///
/// Args:
///     boxes: float32 array of shape (N, 4) as x1, y1, x2, y2
///     scores: float32 array of shape (N,)
///     iou_threshold: IoU at or above which a lower-scored box is dropped
///
/// Returns:
///     Indices of kept boxes, best first
#[pyfunction]
#[pyo3(signature = (boxes, scores, iou_threshold = 0.45))]
fn nms_indices(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    iou_threshold: f32,
) -> PyResult<Vec<usize>> {
    let dets = detections_from_arrays(&boxes, &scores)?;
    Ok(nmsfilter::suppress_indices(&dets, iou_threshold))
}

/// Per-class NMS over numpy arrays; returns kept indices, best first.
#[pyfunction]
#[pyo3(signature = (boxes, scores, class_ids, iou_threshold = 0.45))]
fn nms_per_class(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    class_ids: PyReadonlyArray1<'_, i64>,
    iou_threshold: f32,
) -> PyResult<Vec<usize>> {
    let mut dets = detections_from_arrays(&boxes, &scores)?;
    let class_ids = class_ids.as_slice()?;
    if class_ids.len() != dets.len() {
        return Err(PyValueError::new_err(
            "class_ids must have one entry per box",
        ));
    }
    for (det, &class_id) in dets.iter_mut().zip(class_ids.iter()) {
        det.class_id = usize::try_from(class_id)
            .map_err(|_| PyValueError::new_err("class_ids must be non-negative"))?;
    }
    Ok(suppress_per_class_indices(&dets, iou_threshold))
}

/// Class-agnostic NMS over Detection objects.
#[pyfunction]
#[pyo3(signature = (detections, iou_threshold = 0.45))]
fn nms(detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    let dets: Vec<RustDetection> = detections.into_iter().map(|d| d.inner).collect();
    nmsfilter::suppress(&dets, iou_threshold)
        .into_iter()
        .map(Detection::from)
        .collect()
}

/// Decode a YOLOv8 head output into detections.
///
/// Args:
///     output: float32 array shaped (4 + C, N) or (N, 4 + C)
///     num_classes: number of classes C
///     score_threshold: minimum best-class score
#[pyfunction]
#[pyo3(signature = (output, num_classes, score_threshold = 0.25))]
fn decode_yolov8(
    output: PyReadonlyArray2<'_, f32>,
    num_classes: usize,
    score_threshold: f32,
) -> PyResult<Vec<Detection>> {
    let shape = output.shape();
    let head =
        HeadOutput::new(output.as_slice()?, shape[0], shape[1], num_classes).map_err(to_py_err)?;
    Ok(nmsfilter::decode_yolov8(&head, score_threshold)
        .into_iter()
        .map(Detection::from)
        .collect())
}

/// Decode, filter, suppress and rescale one head output.
///
/// Args:
///     output: float32 array shaped (4 + C, N) or (N, 4 + C)
///     num_classes: number of classes C
///     input_size: model input (width, height)
///     image_size: source image (width, height)
///     score_threshold: minimum best-class score (default: 0.25)
///     iou_threshold: suppression IoU (default: 0.45)
///     class_aware: suppress within each class only (default: False)
///     max_detections: optional cap on returned detections
#[pyfunction]
#[pyo3(signature = (
    output,
    num_classes,
    input_size,
    image_size,
    score_threshold = 0.25,
    iou_threshold = 0.45,
    class_aware = false,
    max_detections = None
))]
#[allow(clippy::too_many_arguments)]
fn post_process(
    output: PyReadonlyArray2<'_, f32>,
    num_classes: usize,
    input_size: (usize, usize),
    image_size: (usize, usize),
    score_threshold: f32,
    iou_threshold: f32,
    class_aware: bool,
    max_detections: Option<usize>,
) -> PyResult<Vec<Detection>> {
    let shape = output.shape();
    let processor = PostProcessor::new(num_classes, input_size).with_config(PostProcessConfig {
        score_threshold,
        iou_threshold,
        class_aware,
        max_detections,
        parallel: class_aware,
    });
    let kept = processor
        .process(output.as_slice()?, (shape[0], shape[1]), image_size)
        .map_err(to_py_err)?;
    Ok(kept.into_iter().map(Detection::from).collect())
}

/// Python module for nmsfilter.
#[pymodule]
fn _nmsfilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(nms, m)?)?;
    m.add_function(wrap_pyfunction!(nms_indices, m)?)?;
    m.add_function(wrap_pyfunction!(nms_per_class, m)?)?;
    m.add_function(wrap_pyfunction!(decode_yolov8, m)?)?;
    m.add_function(wrap_pyfunction!(post_process, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
