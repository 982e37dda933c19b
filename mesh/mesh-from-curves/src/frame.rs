//! Ring frames for sweeping a shape along a path.
//!
//! Shapes are authored in their local XZ plane with +Y as the sweep axis. At
//! each path step the shape is rotated so +Y lines up with the path's forward
//! direction, then moved to the path position.

use curve_types::Curve;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// How close `forward · up` may get to -1 before the fixed flip is used.
///
/// Shortest-arc rotations lose their axis as forward approaches -up; snapping
/// to one fixed rotation inside this band keeps the result deterministic.
pub const ANTIPARALLEL_TOLERANCE: f64 = 1e-6;

/// Canonical sweep axis of a shape's local frame.
#[must_use]
pub fn up() -> Vector3<f64> {
    Vector3::y()
}

/// The rotation taking +Y onto `forward`.
///
/// When `forward` points (almost) straight down the rotation is a half turn
/// about +Z. A zero `forward` yields the identity.
///
/// # Example
///
/// ```
/// use mesh_from_curves::path_rotation;
/// use nalgebra::Vector3;
///
/// let rot = path_rotation(&Vector3::x());
/// assert!((rot * Vector3::y() - Vector3::x()).norm() < 1e-12);
///
/// let flipped = path_rotation(&-Vector3::y());
/// assert!((flipped * Vector3::y() + Vector3::y()).norm() < 1e-12);
/// ```
#[must_use]
pub fn path_rotation(forward: &Vector3<f64>) -> UnitQuaternion<f64> {
    let Some(forward) = forward.try_normalize(f64::EPSILON) else {
        return UnitQuaternion::identity();
    };

    if forward.dot(&up()) < -1.0 + ANTIPARALLEL_TOLERANCE {
        return half_turn();
    }

    UnitQuaternion::rotation_between(&up(), &forward).unwrap_or_else(half_turn)
}

fn half_turn() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI)
}

/// Placement of one shape ring along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingFrame {
    /// Path position at this step.
    pub origin: Point3<f64>,
    /// Unit path direction at this step.
    pub forward: Vector3<f64>,
    /// Rotation applied to shape-local offsets.
    pub rotation: UnitQuaternion<f64>,
}

impl RingFrame {
    /// Frame for a ring at `forward` through `origin`.
    #[must_use]
    pub fn new(origin: Point3<f64>, forward: Vector3<f64>) -> Self {
        Self {
            origin,
            forward,
            rotation: path_rotation(&forward),
        }
    }

    /// Sample `path` at `t` and build the ring frame there.
    #[must_use]
    pub fn on_curve<C: Curve + ?Sized>(path: &C, t: f64) -> Self {
        Self::new(path.position_sample(t), path.forward_sample(t))
    }

    /// Map a shape-local point into world space.
    #[must_use]
    pub fn place(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation * local.coords
    }
}
