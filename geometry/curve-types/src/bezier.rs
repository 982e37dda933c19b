//! Piecewise cubic Bézier splines.
//!
//! A [`Bezier`] is an ordered run of [`ControlPoint`] knots. Consecutive knots
//! form one cubic segment: the start knot's point and out-handle, followed by
//! the end knot's in-handle and point.

use crate::{Curve, CurveError, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared distance below which the first and last knots count as coincident.
pub const CLOSED_TOLERANCE_SQ: f64 = 1e-4;

/// Below this parameter, [`Bezier::forward_sample`] uses the first knot's handle.
const FORWARD_START_T: f64 = 0.001;

/// Above this parameter, [`Bezier::forward_sample`] uses the last knot's handle.
const FORWARD_END_T: f64 = 0.999;

/// Central difference half-width, divided by the knot count.
const FORWARD_OFFSET: f64 = 0.01;

/// One knot of a cubic spline: a point plus its incoming and outgoing handles.
///
/// Handles are stored as absolute positions, not offsets from `point`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    /// The knot position the curve passes through.
    pub point: Point3<f64>,
    /// Handle shaping the segment arriving at this knot.
    pub in_tangent: Point3<f64>,
    /// Handle shaping the segment leaving this knot.
    pub out_tangent: Point3<f64>,
}

impl ControlPoint {
    /// Create a knot with fully independent handles.
    #[must_use]
    pub const fn new(
        point: Point3<f64>,
        in_tangent: Point3<f64>,
        out_tangent: Point3<f64>,
    ) -> Self {
        Self {
            point,
            in_tangent,
            out_tangent,
        }
    }

    /// Create a sharp corner: both handles sit on the point itself.
    ///
    /// # Example
    ///
    /// ```
    /// use curve_types::ControlPoint;
    /// use nalgebra::Point3;
    ///
    /// let cp = ControlPoint::sharp(Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(cp.in_tangent, cp.point);
    /// assert_eq!(cp.out_tangent, cp.point);
    /// ```
    #[must_use]
    pub const fn sharp(point: Point3<f64>) -> Self {
        Self::new(point, point, point)
    }

    /// Create a smooth knot from one handle; the other is its mirror through `point`.
    ///
    /// `in_tangent` is taken as given and `out_tangent = 2 * point - in_tangent`.
    #[must_use]
    pub fn mirrored(point: Point3<f64>, in_tangent: Point3<f64>) -> Self {
        Self::new(point, in_tangent, point + (point - in_tangent))
    }

    /// Incoming handle relative to the knot.
    #[must_use]
    pub fn in_offset(&self) -> Vector3<f64> {
        self.in_tangent - self.point
    }

    /// Outgoing handle relative to the knot.
    #[must_use]
    pub fn out_offset(&self) -> Vector3<f64> {
        self.out_tangent - self.point
    }

    /// The same knot traversed in the opposite direction.
    #[must_use]
    pub const fn flipped(&self) -> Self {
        Self::new(self.point, self.out_tangent, self.in_tangent)
    }
}

/// A piecewise cubic Bézier spline over two or more knots.
///
/// The parameter domain `[0, 1]` is split evenly between the `n - 1` segments,
/// regardless of their length.
///
/// # Example
///
/// ```
/// use curve_types::{Bezier, ControlPoint, Curve};
/// use nalgebra::Point3;
///
/// let spline = Bezier::new(vec![
///     ControlPoint::sharp(Point3::new(0.0, 0.0, 0.0)),
///     ControlPoint::mirrored(Point3::new(0.5, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
///     ControlPoint::sharp(Point3::new(1.0, 0.0, 0.0)),
/// ])
/// .unwrap();
///
/// let top = spline.position_sample(0.5);
/// assert!((top.y - 1.0).abs() < 1e-10);
/// assert!(!spline.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bezier {
    control_points: Vec<ControlPoint>,
}

impl Bezier {
    /// Create a spline from an ordered knot sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] if fewer than 2 knots are given.
    pub fn new(control_points: impl IntoIterator<Item = ControlPoint>) -> Result<Self> {
        let control_points = collect_control_points(control_points)?;
        Ok(Self { control_points })
    }

    /// Wrap knots already known to number at least 2.
    pub(crate) fn from_knots(control_points: Vec<ControlPoint>) -> Self {
        debug_assert!(control_points.len() >= 2);
        Self { control_points }
    }

    /// Replace the whole knot sequence.
    ///
    /// On error the existing knots are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] if fewer than 2 knots are given.
    pub fn update_control_points(
        &mut self,
        control_points: impl IntoIterator<Item = ControlPoint>,
    ) -> Result<()> {
        self.control_points = collect_control_points(control_points)?;
        Ok(())
    }

    /// The knots, in curve order.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Number of knots (always at least 2).
    #[must_use]
    pub fn knot_count(&self) -> usize {
        self.control_points.len()
    }

    /// Number of cubic segments (`knot_count - 1`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.control_points.len() - 1
    }

    /// The same curve traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            control_points: self
                .control_points
                .iter()
                .rev()
                .map(ControlPoint::flipped)
                .collect(),
        }
    }

    fn first(&self) -> &ControlPoint {
        &self.control_points[0]
    }

    fn last(&self) -> &ControlPoint {
        &self.control_points[self.control_points.len() - 1]
    }

    /// Analytic direction of a knot's outgoing handle, if it has length.
    fn handle_direction(cp: &ControlPoint) -> Option<Vector3<f64>> {
        cp.out_offset().try_normalize(f64::EPSILON)
    }

    fn central_difference(&self, t: f64) -> Option<Vector3<f64>> {
        let offset = FORWARD_OFFSET / self.knot_count() as f64;
        let before = self.position_sample((t - offset).clamp(0.0, 1.0));
        let after = self.position_sample((t + offset).clamp(0.0, 1.0));
        (after - before).try_normalize(f64::EPSILON)
    }
}

impl Curve for Bezier {
    fn position_sample(&self, t: f64) -> Point3<f64> {
        let segments = self.segment_count();
        let segment_space_t = t.clamp(0.0, 1.0) * segments as f64;
        let floor = segment_space_t.floor();
        let start = (floor as usize).min(segments);
        let u = segment_space_t - floor;

        if u <= 0.0 {
            return self.control_points[start].point;
        }
        if u >= 1.0 || start == segments {
            return self.control_points[(start + 1).min(segments)].point;
        }

        let a = &self.control_points[start];
        let b = &self.control_points[start + 1];

        let s = 1.0 - u;
        let s2 = s * s;
        let u2 = u * u;

        Point3::from(
            a.point.coords * (s2 * s)
                + a.out_tangent.coords * (3.0 * s2 * u)
                + b.in_tangent.coords * (3.0 * s * u2)
                + b.point.coords * (u2 * u),
        )
    }

    fn forward_sample(&self, t: f64) -> Vector3<f64> {
        let analytic = if t < FORWARD_START_T {
            Self::handle_direction(self.first())
        } else if t > FORWARD_END_T {
            Self::handle_direction(self.last())
        } else {
            None
        };

        analytic
            .or_else(|| self.central_difference(t))
            .unwrap_or_else(Vector3::y)
    }

    fn is_closed(&self) -> bool {
        (self.first().point - self.last().point).norm_squared() < CLOSED_TOLERANCE_SQ
    }
}

fn collect_control_points(
    control_points: impl IntoIterator<Item = ControlPoint>,
) -> Result<Vec<ControlPoint>> {
    let control_points: Vec<ControlPoint> = control_points.into_iter().collect();
    if control_points.len() < 2 {
        return Err(CurveError::insufficient_points(2, control_points.len()));
    }
    Ok(control_points)
}
