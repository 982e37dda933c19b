//! Error types for curve operations.

use thiserror::Error;

/// Errors that can occur while building or editing curves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },
}

impl CurveError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_points_message() {
        let err = CurveError::insufficient_points(2, 1);
        assert_eq!(
            err.to_string(),
            "insufficient points: need at least 2, got 1"
        );
    }
}
