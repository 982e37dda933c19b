//! Axis-aligned bounds of generated geometry.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// Starts out [empty](Self::empty) (min above max) and grows as points are added.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let mut aabb = Aabb::empty();
/// assert!(aabb.is_empty());
///
/// aabb.expand_to_include(&Point3::new(-1.0, 0.0, 2.0));
/// aabb.expand_to_include(&Point3::new(1.0, 4.0, 0.0));
/// assert!(aabb.contains(&Point3::new(0.0, 2.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Smallest x, y and z seen.
    pub min: Point3<f64>,
    /// Largest x, y and z seen.
    pub max: Point3<f64>,
}

impl Aabb {
    /// A box containing nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// The tightest box around `points`; empty if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.expand_to_include(p);
            aabb
        })
    }

    /// True until at least one point has been included.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box so it contains `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Extent along each axis (zero for an empty box).
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
