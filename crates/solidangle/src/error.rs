//! Errors surfaced by the evaluator and the aggregator.
//!
//! Numeric domain issues (arccos overshoot, negative radicand) are not errors;
//! they are clamped inside `triangle`. Only inputs with no defined solid angle
//! reach the caller.

/// Errors surfaced by solid-angle evaluation.
///
/// `vertex` is the index within the triangle (0..3) for direct triangle calls,
/// and the index within the face when `face` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolidAngleError {
    /// A vertex coincides with the observation point (zero-length direction).
    #[error("vertex {vertex}{} coincides with the observation point", at_face(.face))]
    DegenerateVertex { face: Option<usize>, vertex: usize },
    /// A face has fewer than three vertices.
    #[error("face {face} has {len} vertices (needs at least 3)")]
    InvalidFace { face: usize, len: usize },
    /// A vertex has a NaN/infinite coordinate, or its offset from the
    /// observation point overflows.
    #[error("vertex {vertex}{} has a non-finite coordinate", at_face(.face))]
    NonFiniteVertex { face: Option<usize>, vertex: usize },
    /// The observation point has a NaN/infinite coordinate.
    #[error("observation point has a non-finite coordinate")]
    NonFiniteObserver,
}

impl SolidAngleError {
    /// Attach the face index to a vertex error.
    pub(crate) fn with_face(self, idx: usize) -> Self {
        match self {
            SolidAngleError::DegenerateVertex { vertex, .. } => SolidAngleError::DegenerateVertex {
                face: Some(idx),
                vertex,
            },
            SolidAngleError::NonFiniteVertex { vertex, .. } => SolidAngleError::NonFiniteVertex {
                face: Some(idx),
                vertex,
            },
            other => other,
        }
    }

    /// Face index the error belongs to, if any.
    pub fn face(&self) -> Option<usize> {
        match *self {
            SolidAngleError::DegenerateVertex { face, .. }
            | SolidAngleError::NonFiniteVertex { face, .. } => face,
            SolidAngleError::InvalidFace { face, .. } => Some(face),
            SolidAngleError::NonFiniteObserver => None,
        }
    }
}

fn at_face(face: &Option<usize>) -> String {
    match face {
        Some(f) => format!(" of face {f}"),
        None => String::new(),
    }
}
