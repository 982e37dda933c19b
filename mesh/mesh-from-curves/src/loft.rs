//! Sweeping a shape curve along a path curve.

use curve_types::Curve;
use mesh_types::MeshBuffer;
use nalgebra::Vector2;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LoftError, LoftResult};
use crate::frame::RingFrame;
use crate::grid::RingGrid;
use crate::normals::{Seams, grid_normals};

/// Smallest accepted path segment count.
pub const MIN_PATH_SEGMENTS: usize = 1;

/// Smallest accepted shape segment count.
pub const MIN_SHAPE_SEGMENTS: usize = 2;

/// Configuration for loft generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoftConfig {
    /// Number of intervals along the path.
    pub path_segments: usize,
    /// Number of intervals around the shape.
    pub shape_segments: usize,
    /// Twist of the shape around the path, in radians. Recorded only.
    pub banking: f64,
    /// Close the start of the sweep. Recorded only.
    pub start_cap: bool,
    /// Close the end of the sweep. Recorded only.
    pub end_cap: bool,
}

impl Default for LoftConfig {
    fn default() -> Self {
        Self {
            path_segments: 10,
            shape_segments: 16,
            banking: 0.0,
            start_cap: false,
            end_cap: false,
        }
    }
}

impl LoftConfig {
    /// Set the number of path intervals.
    #[must_use]
    pub const fn with_path_segments(mut self, segments: usize) -> Self {
        self.path_segments = segments;
        self
    }

    /// Set the number of shape intervals.
    #[must_use]
    pub const fn with_shape_segments(mut self, segments: usize) -> Self {
        self.shape_segments = segments;
        self
    }

    /// Set the banking angle.
    #[must_use]
    pub const fn with_banking(mut self, banking: f64) -> Self {
        self.banking = banking;
        self
    }

    /// Request start and end caps.
    #[must_use]
    pub const fn with_caps(mut self, start: bool, end: bool) -> Self {
        self.start_cap = start;
        self.end_cap = end;
        self
    }

    /// Check segment counts against the loft minimums.
    ///
    /// # Errors
    ///
    /// Returns [`LoftError::TooFewSegments`] naming the first count that is
    /// too small.
    pub fn validate(&self) -> LoftResult<()> {
        if self.path_segments < MIN_PATH_SEGMENTS {
            return Err(LoftError::too_few_segments(
                "path_segments",
                MIN_PATH_SEGMENTS,
                self.path_segments,
            ));
        }
        if self.shape_segments < MIN_SHAPE_SEGMENTS {
            return Err(LoftError::too_few_segments(
                "shape_segments",
                MIN_SHAPE_SEGMENTS,
                self.shape_segments,
            ));
        }
        Ok(())
    }
}

/// A shape swept along a path.
///
/// The shape is read in its own local frame with +Y as the sweep axis; each
/// ring is rotated so that axis follows the path's forward direction.
///
/// # Example
///
/// ```
/// use curve_types::{Bezier, smooth_spline};
/// use mesh_from_curves::Loft;
/// use nalgebra::Point3;
///
/// let path = smooth_spline(&[Point3::origin(), Point3::new(0.0, 10.0, 0.0)], false).unwrap();
/// let shape = Bezier::circle(1.0);
///
/// let mesh = Loft::new(&path, &shape).generate_mesh(10, 16).unwrap();
/// assert_eq!(mesh.vertex_count(), 17 * 11);
/// assert_eq!(mesh.triangle_count(), 16 * 10 * 2);
/// ```
#[derive(Debug)]
pub struct Loft<'a, P: ?Sized, S: ?Sized> {
    path: &'a P,
    shape: &'a S,
}

impl<'a, P: Curve + ?Sized, S: Curve + ?Sized> Loft<'a, P, S> {
    /// Pair a path with a shape.
    #[must_use]
    pub const fn new(path: &'a P, shape: &'a S) -> Self {
        Self { path, shape }
    }

    /// The path curve.
    #[must_use]
    pub const fn path(&self) -> &'a P {
        self.path
    }

    /// The shape curve.
    #[must_use]
    pub const fn shape(&self) -> &'a S {
        self.shape
    }

    /// Generate the swept mesh with the given segment counts.
    ///
    /// # Errors
    ///
    /// Returns [`LoftError::TooFewSegments`] if `path_segments < 1` or
    /// `shape_segments < 2`.
    pub fn generate_mesh(&self, path_segments: usize, shape_segments: usize) -> LoftResult<MeshBuffer> {
        self.generate_with(
            &LoftConfig::default()
                .with_path_segments(path_segments)
                .with_shape_segments(shape_segments),
        )
    }

    /// Generate the swept mesh from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LoftError::TooFewSegments`] if a segment count is below its
    /// minimum. Nothing is allocated in that case.
    pub fn generate_with(&self, config: &LoftConfig) -> LoftResult<MeshBuffer> {
        config.validate()?;

        if config.banking != 0.0 {
            debug!(banking = config.banking, "banking is not applied to lofts");
        }
        if config.start_cap || config.end_cap {
            debug!(
                start = config.start_cap,
                end = config.end_cap,
                "loft end caps are not generated"
            );
        }

        let grid = RingGrid::new(config.path_segments, config.shape_segments);
        let mut mesh = MeshBuffer::with_capacity(grid.vertex_count(), grid.triangle_count());

        // Shape samples are the same for every ring.
        let shape_points: Vec<_> = (0..grid.ring_width())
            .map(|s| {
                let t = grid.shape_t(s);
                (self.shape.position_sample(t), t)
            })
            .collect();

        for p in 0..grid.ring_count() {
            let v = grid.path_t(p);
            let frame = RingFrame::on_curve(self.path, v);
            for (local, u) in &shape_points {
                mesh.positions.push(frame.place(local));
                mesh.uvs.push(Vector2::new(*u, v));
            }
        }

        mesh.indices.extend(grid.triangles().flatten());

        let seams = Seams {
            path: self.path.is_closed(),
            shape: self.shape.is_closed(),
        };
        mesh.normals = grid_normals(&grid, &mesh.positions, &mesh.indices, seams);

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            path_closed = seams.path,
            shape_closed = seams.shape,
            "generated loft"
        );

        Ok(mesh)
    }
}

/// Sweep `shape` along `path` in one call.
///
/// # Errors
///
/// Same as [`Loft::generate_mesh`].
pub fn loft<P: Curve + ?Sized, S: Curve + ?Sized>(
    path: &P,
    shape: &S,
    path_segments: usize,
    shape_segments: usize,
) -> LoftResult<MeshBuffer> {
    Loft::new(path, shape).generate_mesh(path_segments, shape_segments)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;
    use curve_types::{Bezier, smooth_spline};
    use nalgebra::Point3;

    fn column() -> Bezier {
        smooth_spline(&[Point3::origin(), Point3::new(0.0, 10.0, 0.0)], false).unwrap()
    }

    #[test]
    fn default_config() {
        let config = LoftConfig::default();
        assert_eq!(config.path_segments, 10);
        assert_eq!(config.shape_segments, 16);
        assert_relative_eq!(config.banking, 0.0);
        assert!(!config.start_cap && !config.end_cap);
    }

    #[test]
    fn builder_sets_fields() {
        let config = LoftConfig::default()
            .with_path_segments(3)
            .with_shape_segments(5)
            .with_banking(0.5)
            .with_caps(true, false);
        assert_eq!(config.path_segments, 3);
        assert_eq!(config.shape_segments, 5);
        assert_relative_eq!(config.banking, 0.5);
        assert!(config.start_cap);
        assert!(!config.end_cap);
    }

    #[test]
    fn segment_minimums_are_enforced() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let lofted = Loft::new(&path, &shape);

        assert!(matches!(
            lofted.generate_mesh(0, 16),
            Err(LoftError::TooFewSegments { what: "path_segments", min: 1, actual: 0 })
        ));
        assert!(matches!(
            lofted.generate_mesh(10, 1),
            Err(LoftError::TooFewSegments { what: "shape_segments", min: 2, actual: 1 })
        ));
        assert!(lofted.generate_mesh(1, 2).is_ok());
    }

    #[test]
    fn buffers_are_consistent() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let mesh = loft(&path, &shape, 4, 6).unwrap();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn rings_follow_the_path() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let mesh = loft(&path, &shape, 5, 8).unwrap();
        let grid = RingGrid::new(5, 8);

        for p in 0..grid.ring_count() {
            let height = path.position_sample(grid.path_t(p)).y;
            for s in 0..grid.ring_width() {
                assert_relative_eq!(mesh.positions[grid.index(s, p)].y, height, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn trailing_column_duplicates_its_neighbour() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let mesh = loft(&path, &shape, 3, 8).unwrap();
        let grid = RingGrid::new(3, 8);

        for p in 0..grid.ring_count() {
            let last = grid.index(8, p);
            let prev = grid.index(7, p);
            assert_relative_eq!(mesh.positions[last], mesh.positions[prev]);
            assert_relative_eq!(mesh.normals[last], mesh.normals[prev]);
        }
    }

    #[test]
    fn hooks_do_not_change_output() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let lofted = Loft::new(&path, &shape);
        let plain = lofted.generate_with(&LoftConfig::default()).unwrap();
        let hooked = lofted
            .generate_with(&LoftConfig::default().with_banking(1.0).with_caps(true, true))
            .unwrap();
        assert_eq!(plain, hooked);
    }

    #[test]
    fn works_through_trait_objects() {
        let path = column();
        let shape = Bezier::circle(1.0);
        let path_dyn: &dyn Curve = &path;
        let shape_dyn: &dyn Curve = &shape;
        let a = loft(path_dyn, shape_dyn, 2, 4).unwrap();
        let b = loft(&path, &shape, 2, 4).unwrap();
        assert_eq!(a, b);
    }
}
