//! Smooth splines through a sequence of points.
//!
//! Each knot's handles are derived from its neighbours so that the in and out
//! handles are reflections of each other through the knot. The resulting
//! spline is tangent-continuous at every interior knot.

use crate::{Bezier, ControlPoint, CurveError, Result};
use nalgebra::Point3;

/// Builds a tangent-continuous [`Bezier`] through an ordered point list.
///
/// # Example
///
/// ```
/// use curve_types::{Curve, SmoothSplineBuilder};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(0.0, 10.0, 0.0),
///     Point3::new(-10.0, 0.0, 0.0),
///     Point3::new(0.0, -10.0, 0.0),
/// ];
///
/// let ring = SmoothSplineBuilder::new(&points).closed(true).build().unwrap();
/// assert!(ring.is_closed());
/// assert_eq!(ring.knot_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct SmoothSplineBuilder<'a> {
    points: &'a [Point3<f64>],
    closed: bool,
}

impl<'a> SmoothSplineBuilder<'a> {
    /// Start a builder over `points`. The spline is open unless [`Self::closed`] is set.
    #[must_use]
    pub const fn new(points: &'a [Point3<f64>]) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Whether the spline should loop back to its first point.
    #[must_use]
    pub const fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Compute the handles and build the spline.
    ///
    /// For a closed spline a copy of the first knot is appended, so the
    /// result has `points.len() + 1` knots and starts and ends on the same point.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`]
    /// for fewer than 2 points.
    pub fn build(&self) -> Result<Bezier> {
        let points = self.points;
        if points.len() < 2 {
            return Err(CurveError::insufficient_points(2, points.len()));
        }

        Ok(Bezier::from_knots(self.knots()))
    }

    /// Knots with computed handles; callers guarantee at least 2 points.
    fn knots(&self) -> Vec<ControlPoint> {
        let mut knots: Vec<ControlPoint> = (0..self.points.len())
            .map(|i| smooth_knot(self.points[i], self.prev(i), self.next(i)))
            .collect();

        if self.closed {
            knots.push(knots[0]);
        }
        knots
    }

    fn prev(&self, i: usize) -> Point3<f64> {
        match i.checked_sub(1) {
            Some(p) => self.points[p],
            None if self.closed => self.points[self.points.len() - 1],
            None => self.points[i],
        }
    }

    fn next(&self, i: usize) -> Point3<f64> {
        match self.points.get(i + 1) {
            Some(n) => *n,
            None if self.closed => self.points[0],
            None => self.points[i],
        }
    }
}

/// Build a smooth spline through `points`, optionally closed.
///
/// Shorthand for `SmoothSplineBuilder::new(points).closed(closed).build()`.
///
/// # Errors
///
/// Returns [`CurveError::InsufficientPoints`]
/// for fewer than 2 points.
pub fn smooth_spline(points: &[Point3<f64>], closed: bool) -> Result<Bezier> {
    SmoothSplineBuilder::new(points).closed(closed).build()
}

/// Handles for `point` given its neighbours.
///
/// A missing neighbour at an open end is the point itself, which flattens the
/// handle toward the one real neighbour.
fn smooth_knot(point: Point3<f64>, prev: Point3<f64>, next: Point3<f64>) -> ControlPoint {
    // Neighbours reflected through the knot.
    let prev_overshoot = point + (point - prev);
    let next_overshoot = point + (point - next);

    let in_tangent = midpoint(prev, next_overshoot);
    let out_tangent = midpoint(next, prev_overshoot);

    ControlPoint::new(
        point,
        midpoint(point, in_tangent),
        midpoint(point, out_tangent),
    )
}

#[inline]
fn midpoint(a: Point3<f64>, b: Point3<f64>) -> Point3<f64> {
    nalgebra::center(&a, &b)
}

impl Bezier {
    /// A closed smooth ring of `radius` in the XZ plane, centred on the origin.
    ///
    /// Built from the four points `(-r, 0, 0)`, `(0, 0, -r)`, `(r, 0, 0)`, `(0, 0, r)`.
    ///
    /// # Example
    ///
    /// ```
    /// use curve_types::{Bezier, Curve};
    ///
    /// let ring = Bezier::circle(2.0);
    /// assert!(ring.is_closed());
    /// assert!((ring.position_sample(0.0).x + 2.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn circle(radius: f64) -> Self {
        let points = [
            Point3::new(-radius, 0.0, 0.0),
            Point3::new(0.0, 0.0, -radius),
            Point3::new(radius, 0.0, 0.0),
            Point3::new(0.0, 0.0, radius),
        ];
        Self::from_knots(SmoothSplineBuilder::new(&points).closed(true).knots())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Curve;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn scattered() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
        let sum = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / points.len() as f64)
    }

    fn assert_handles_reflect(spline: &Bezier) {
        let knots = spline.control_points();
        for cp in &knots[1..knots.len() - 1] {
            assert_relative_eq!(cp.in_offset(), -cp.out_offset(), epsilon = 1e-4);
        }
    }

    #[test]
    fn open_spline_hits_endpoints() {
        let points = scattered();
        let spline = smooth_spline(&points, false).unwrap();

        assert_relative_eq!(spline.position_sample(0.0), points[0], epsilon = 1e-4);
        assert_relative_eq!(spline.position_sample(1.0), points[7], epsilon = 1e-4);
        assert!(!spline.is_closed());
        assert_handles_reflect(&spline);
    }

    #[test]
    fn open_spline_stays_near_points() {
        let points = scattered();
        let center = centroid(&points);
        let spline = smooth_spline(&points, false).unwrap();

        for i in 0..100 {
            let t = f64::from(i) / 100.0;
            assert!((spline.position_sample(t) - center).norm() <= 1.0);
        }
    }

    #[test]
    fn closed_spline_returns_to_start() {
        let points = &scattered()[..7];
        let center = centroid(points);
        let spline = smooth_spline(points, true).unwrap();

        assert_eq!(spline.knot_count(), 8);
        assert!(spline.is_closed());
        assert_relative_eq!(spline.position_sample(0.0), points[0], epsilon = 1e-4);
        assert_relative_eq!(spline.position_sample(1.0), points[0], epsilon = 1e-4);
        assert_handles_reflect(&spline);

        for i in 0..100 {
            let t = f64::from(i) / 100.0;
            assert!((spline.position_sample(t) - center).norm() <= 1.0);
        }
    }

    #[test]
    fn closed_flag_matches_construction() {
        let points = [
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(-10.0, 0.0, 0.0),
            Point3::new(0.0, -10.0, 0.0),
        ];

        assert!(smooth_spline(&points, true).unwrap().is_closed());
        assert!(!smooth_spline(&points, false).unwrap().is_closed());
    }

    #[test]
    fn knots_are_reproduced_at_their_fraction() {
        let points = scattered();
        let spline = smooth_spline(&points, false).unwrap();
        let last = (points.len() - 1) as f64;

        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(spline.position_sample(i as f64 / last), *p, epsilon = 1e-4);
        }
    }

    #[test]
    fn two_points_make_a_straight_line() {
        let a = Point3::new(-300.0, 0.0, 237.0);
        let b = Point3::new(1.0, 25.0, -187.0);
        let spline = smooth_spline(&[a, b], false).unwrap();
        let dir = (b - a).normalize();

        for i in 0..20 {
            let t = f64::from(i) / 20.0;
            let offset = spline.position_sample(t) - a;
            let off_line = offset - dir * offset.dot(&dir);
            assert!(off_line.norm() < 1e-3);
        }
    }

    #[test]
    fn forward_follows_a_straight_line() {
        let a = Point3::new(-300.0, 100.0, 37.5);
        let b = Point3::new(1.2134, -35.0, 175.0);
        let spline = smooth_spline(&[a, b], false).unwrap();
        let dir = (b - a).normalize();

        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            assert_relative_eq!(spline.forward_sample(t).dot(&dir), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn forward_does_not_flip_on_closed_splines() {
        let points = [
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(-10.0, 0.0, 0.0),
            Point3::new(0.0, -10.0, 0.0),
        ];
        let spline = smooth_spline(&points, true).unwrap();

        assert_relative_eq!(
            spline.forward_sample(0.0),
            spline.forward_sample(1.0),
            epsilon = 1e-4
        );
    }

    #[test]
    fn open_ends_flatten_toward_neighbour() {
        let points = [Point3::origin(), Point3::new(4.0, 0.0, 0.0)];
        let spline = smooth_spline(&points, false).unwrap();
        let knots = spline.control_points();

        assert_relative_eq!(knots[0].out_tangent, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(knots[1].in_tangent, Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn too_few_points_fail() {
        let err = smooth_spline(&[Point3::origin()], false).unwrap_err();
        assert_eq!(err, CurveError::insufficient_points(2, 1));
        assert!(SmoothSplineBuilder::new(&[]).closed(true).build().is_err());
    }

    #[test]
    fn circle_is_closed_ring_in_xz() {
        let ring = Bezier::circle(3.0);
        assert!(ring.is_closed());
        assert_eq!(ring.knot_count(), 5);

        for i in 0..=40 {
            let p = ring.position_sample(f64::from(i) / 40.0);
            assert_relative_eq!(p.y, 0.0);
            // Four-knot smooth rings bulge slightly inside the true circle.
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r > 2.0 && r <= 3.0 + 1e-9, "radius {r} at sample {i}");
        }
    }
}
