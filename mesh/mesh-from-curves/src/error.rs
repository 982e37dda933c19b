//! Error types for loft operations.

use curve_types::CurveError;
use thiserror::Error;

/// Result type for mesh-from-curves operations.
pub type LoftResult<T> = Result<T, LoftError>;

/// Errors that can occur during curve-to-mesh operations.
///
/// Every variant is a caller error; none is worth retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoftError {
    /// A segment count is below the minimum for the operation.
    #[error("{what} must be at least {min}, got {actual}")]
    TooFewSegments {
        /// Which segment count was rejected.
        what: &'static str,
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// A cross-section cap was requested for a curve that does not close.
    #[error("only closed curves can be triangulated into a cap")]
    OpenCrossSection,

    /// Building an input curve failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl LoftError {
    /// Create a too-few-segments error.
    #[must_use]
    pub fn too_few_segments(what: &'static str, min: usize, actual: usize) -> Self {
        Self::TooFewSegments { what, min, actual }
    }
}
