//! Core curve trait.
//!
//! Every sweepable curve answers three questions: where is it at `t`, which way
//! is it heading at `t`, and does it loop back onto itself.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space, sampled over `t ∈ [0, 1]`.
///
/// `t = 0` is the start of the curve and `t = 1` is the end. Callers are
/// expected to keep `t` inside that range; implementations are free to clamp.
///
/// # Implementors
///
/// - [`Bezier`](crate::Bezier) - Piecewise cubic spline through control points
///
/// Scene-side wrappers that rebuild a curve lazily should own a [`Bezier`](crate::Bezier)
/// and delegate to it; the trait is object safe for that purpose.
pub trait Curve {
    /// Position on the curve at parameter `t`.
    fn position_sample(&self, t: f64) -> Point3<f64>;

    /// Unit-length forward (tangent) direction at parameter `t`.
    fn forward_sample(&self, t: f64) -> Vector3<f64>;

    /// Whether the curve ends where it starts.
    fn is_closed(&self) -> bool;

    /// Sample `count` positions evenly spaced over `[0, 1]`, inclusive of both ends.
    ///
    /// Returns an empty vector for `count == 0` and the start point for `count == 1`.
    fn sample_positions(&self, count: usize) -> Vec<Point3<f64>> {
        match count {
            0 => Vec::new(),
            1 => vec![self.position_sample(0.0)],
            _ => {
                let last = (count - 1) as f64;
                (0..count)
                    .map(|i| self.position_sample(i as f64 / last))
                    .collect()
            }
        }
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn position_sample(&self, t: f64) -> Point3<f64> {
        (**self).position_sample(t)
    }

    fn forward_sample(&self, t: f64) -> Vector3<f64> {
        (**self).forward_sample(t)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn position_sample(&self, t: f64) -> Point3<f64> {
        (**self).position_sample(t)
    }

    fn forward_sample(&self, t: f64) -> Vector3<f64> {
        (**self).forward_sample(t)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
