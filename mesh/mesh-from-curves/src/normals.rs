//! Smooth vertex normals for loft grids, with seam repair.
//!
//! Normals are accumulated from unit face normals, then the duplicated seam
//! vertices of closed curves are merged so that both copies share the union of
//! their contributions, and finally every sum is normalized once.

use nalgebra::{Point3, Vector3};

use crate::grid::RingGrid;

/// Which seams of a grid to merge before normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Seams {
    /// Merge the first and last rings (closed path).
    pub path: bool,
    /// Merge the first and last wrapped columns of every ring (closed shape).
    pub shape: bool,
}

/// Compute smooth per-vertex normals for a loft grid.
///
/// `positions` must hold `grid.vertex_count()` entries and `indices` must come
/// from [`RingGrid::triangles`].
#[must_use]
pub fn grid_normals(
    grid: &RingGrid,
    positions: &[Point3<f64>],
    indices: &[u32],
    seams: Seams,
) -> Vec<Vector3<f64>> {
    let mut normals = accumulate_face_normals(positions, indices);

    if seams.path {
        merge_path_seam(grid, &mut normals);
    }
    if seams.shape {
        merge_shape_seam(grid, &mut normals);
    }

    for n in &mut normals {
        *n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
    }

    // The trailing column is not referenced by any triangle; it sits on top of
    // the column before it.
    if grid.shape_segments >= 1 {
        for p in 0..grid.ring_count() {
            let src = grid.index(grid.shape_segments - 1, p);
            let dst = grid.index(grid.shape_segments, p);
            normals[dst] = normals[src];
        }
    }

    normals
}

/// Sum the unit face normal of every triangle onto its three corners.
///
/// The face normal is `(v2 - v1) × (v3 - v1)` normalized; zero-area triangles
/// contribute nothing.
#[must_use]
pub fn accumulate_face_normals(positions: &[Point3<f64>], indices: &[u32]) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(v1), Some(v2), Some(v3)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };

        let Some(face) = (v2 - v1).cross(&(v3 - v1)).try_normalize(f64::EPSILON) else {
            continue;
        };

        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
}

/// Merge ring 0 with the last ring, column by column.
fn merge_path_seam(grid: &RingGrid, normals: &mut [Vector3<f64>]) {
    let snapshot = normals.to_vec();
    for s in 0..grid.ring_width() {
        let first = grid.index(s, 0);
        let last = grid.index(s, grid.path_segments);
        if first == last {
            continue;
        }
        let sum = snapshot[first] + snapshot[last];
        normals[first] = sum;
        normals[last] = sum;
    }
}

/// Merge column 0 with column `shape_segments - 1` in every ring.
fn merge_shape_seam(grid: &RingGrid, normals: &mut [Vector3<f64>]) {
    if grid.shape_segments < 2 {
        return;
    }
    let snapshot = normals.to_vec();
    for p in 0..grid.ring_count() {
        let first = grid.index(0, p);
        let last = grid.index(grid.shape_segments - 1, p);
        let sum = snapshot[first] + snapshot[last];
        normals[first] = sum;
        normals[last] = sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_triangle_gets_unit_normals() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normals = accumulate_face_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert_relative_eq!(n, Vector3::z());
        }
    }

    #[test]
    fn degenerate_triangle_contributes_nothing() {
        let positions = vec![Point3::origin(); 3];
        let normals = accumulate_face_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|n| *n == Vector3::zeros()));
    }

    #[test]
    fn unreferenced_vertices_normalize_to_zero() {
        let grid = RingGrid::new(1, 2);
        let positions = vec![Point3::origin(); grid.vertex_count()];
        let normals = grid_normals(&grid, &positions, &[], Seams::default());
        assert_eq!(normals.len(), grid.vertex_count());
        assert!(normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn path_seam_shares_contributions() {
        let grid = RingGrid::new(2, 2);
        let mut normals = vec![Vector3::zeros(); grid.vertex_count()];
        normals[grid.index(0, 0)] = Vector3::x();
        normals[grid.index(0, 2)] = Vector3::y();

        merge_path_seam(&grid, &mut normals);

        let expected = Vector3::x() + Vector3::y();
        assert_relative_eq!(normals[grid.index(0, 0)], expected);
        assert_relative_eq!(normals[grid.index(0, 2)], expected);
        assert_eq!(normals[grid.index(0, 1)], Vector3::zeros());
    }

    #[test]
    fn both_seams_give_corners_the_union_once() {
        let grid = RingGrid::new(2, 3);
        let mut normals = vec![Vector3::zeros(); grid.vertex_count()];
        let corners = [
            grid.index(0, 0),
            grid.index(2, 0),
            grid.index(0, 2),
            grid.index(2, 2),
        ];
        let parts = [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, 1.0, 1.0)];
        for (idx, part) in corners.iter().zip(parts) {
            normals[*idx] = part;
        }

        merge_path_seam(&grid, &mut normals);
        merge_shape_seam(&grid, &mut normals);

        let union = Vector3::new(2.0, 2.0, 2.0);
        for idx in corners {
            assert_relative_eq!(normals[idx], union);
        }
    }
}
