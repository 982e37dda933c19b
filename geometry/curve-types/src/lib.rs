//! Cubic Bézier splines for procedural geometry.
//!
//! This crate provides the curve half of curve-driven mesh generation:
//!
//! - [`Curve`] - The sampling interface every sweepable curve implements
//! - [`ControlPoint`] - One knot with incoming and outgoing handles
//! - [`Bezier`] - A piecewise cubic spline over two or more knots
//! - [`SmoothSplineBuilder`] - Builds a tangent-continuous [`Bezier`] through raw points
//!
//! # Core Trait
//!
//! [`Curve`] exposes exactly what a sweep needs:
//!
//! - **Position**: [`Curve::position_sample`] at `t ∈ [0, 1]`
//! - **Direction**: [`Curve::forward_sample`], always unit length
//! - **Topology**: [`Curve::is_closed`], derived from the end points
//!
//! # Example
//!
//! ```
//! use curve_types::{Curve, smooth_spline};
//! use nalgebra::Point3;
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 2.0, 0.0),
//!     Point3::new(3.0, 2.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//! ];
//!
//! let spline = smooth_spline(&points, false).unwrap();
//!
//! // The spline passes through every input point.
//! let knot = spline.position_sample(1.0 / 3.0);
//! assert!((knot - points[1]).norm() < 1e-4);
//!
//! let forward = spline.forward_sample(0.5);
//! assert!((forward.norm() - 1.0).abs() < 1e-10);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, with **+Y as the canonical up axis**. Cross-section shapes
//! are authored in the XZ plane so a sweep can rotate +Y onto the path's
//! forward direction.
//!
//! # Thread Safety
//!
//! [`Bezier`] is plain immutable data once built and is `Send + Sync`; sample
//! it from as many threads as needed.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::suboptimal_flops
)]

mod bezier;
mod error;
mod smooth;
mod traits;

pub use bezier::{Bezier, CLOSED_TOLERANCE_SQ, ControlPoint};
pub use error::CurveError;
pub use smooth::{SmoothSplineBuilder, smooth_spline};
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn bezier_is_thread_safe() {
        assert_send_sync::<Bezier>();
        assert_send_sync::<ControlPoint>();
    }

    #[test]
    fn concurrent_sampling_agrees() {
        let ring = Bezier::circle(1.0);
        let expected: Vec<Point3<f64>> = ring.sample_positions(32);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| ring.sample_positions(32)))
                .collect();
            for handle in handles {
                let samples = handle.join().unwrap_or_default();
                assert_eq!(samples, expected);
            }
        });
    }
}
