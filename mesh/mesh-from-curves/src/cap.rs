//! Flat caps over the cross-section of a closed curve.

use curve_types::Curve;
use mesh_types::MeshBuffer;
use nalgebra::{Point3, Vector2, Vector3};
use tracing::debug;

use crate::error::{LoftError, LoftResult};

/// Planar polygon triangulation.
///
/// Implementations receive an ordered, closed loop (without a repeated last
/// point) and return triangle corner indices into that loop, three per
/// triangle. Callers guarantee the loop is roughly planar and does not
/// self-intersect; winding of the output is fixed up by the caller.
pub trait Triangulator {
    /// Triangulate `loop_points` and return corner indices.
    fn triangulate(&self, loop_points: &[Point3<f64>]) -> Vec<u32>;
}

impl<T: Triangulator + ?Sized> Triangulator for &T {
    fn triangulate(&self, loop_points: &[Point3<f64>]) -> Vec<u32> {
        (**self).triangulate(loop_points)
    }
}

/// Fan triangulation from the first loop point.
///
/// Exact for convex and star-shaped-from-the-first-point loops, which covers
/// the smooth rings this crate produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(&self, loop_points: &[Point3<f64>]) -> Vec<u32> {
        let n = loop_points.len();
        if n < 3 {
            return Vec::new();
        }
        (1..n - 1)
            .flat_map(|i| [0, i as u32, i as u32 + 1])
            .collect()
    }
}

/// Triangulate the cross-section enclosed by a closed curve.
///
/// The curve is sampled at `t = i / samples` for `i in 0..samples`, shifted by
/// `offset`, and handed to `triangulator`. Every vertex gets the same disc
/// normal `normalize(forward(0) × (position(0) - centroid))`, and every
/// triangle is wound to face along it. UVs are a planar projection scaled
/// into `[0, 1]`.
///
/// # Errors
///
/// Returns [`LoftError::OpenCrossSection`] if `curve` is not closed, and
/// [`LoftError::TooFewSegments`] if `samples < 3`.
///
/// # Example
///
/// ```
/// use curve_types::Bezier;
/// use mesh_from_curves::{FanTriangulator, triangulate_cross_section};
/// use nalgebra::Vector3;
///
/// let ring = Bezier::circle(2.0);
/// let cap = triangulate_cross_section(&ring, 12, Vector3::y() * 3.0, &FanTriangulator).unwrap();
///
/// assert_eq!(cap.vertex_count(), 12);
/// assert_eq!(cap.triangle_count(), 10);
/// assert!(cap.normals.iter().all(|n| n.y > 0.99));
/// ```
pub fn triangulate_cross_section<C: Curve + ?Sized>(
    curve: &C,
    samples: usize,
    offset: Vector3<f64>,
    triangulator: &dyn Triangulator,
) -> LoftResult<MeshBuffer> {
    if !curve.is_closed() {
        return Err(LoftError::OpenCrossSection);
    }
    if samples < 3 {
        return Err(LoftError::too_few_segments("cap samples", 3, samples));
    }

    let points: Vec<Point3<f64>> = (0..samples)
        .map(|i| curve.position_sample(i as f64 / samples as f64) + offset)
        .collect();

    let centroid = Point3::from(
        points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / samples as f64,
    );
    let radial = points[0] - centroid;
    let normal = curve
        .forward_sample(0.0)
        .cross(&radial)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::y);

    let uvs = planar_uvs(&points, &centroid, &radial, &normal);

    let mut mesh = MeshBuffer::with_capacity(samples, samples - 2);
    for (point, uv) in points.iter().zip(uvs) {
        mesh.push_vertex(*point, normal, uv);
    }

    let corners = triangulator.triangulate(&points);
    let mut skipped = 0usize;
    for tri in corners.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        if [a, b, c].iter().any(|&i| i as usize >= samples) {
            skipped += 1;
            continue;
        }
        let face = (points[b as usize] - points[a as usize])
            .cross(&(points[c as usize] - points[a as usize]));
        if face.dot(&normal) < 0.0 {
            mesh.push_triangle([a, c, b]);
        } else {
            mesh.push_triangle([a, b, c]);
        }
    }

    if skipped > 0 {
        debug!(skipped, "dropped cap triangles with out-of-range corners");
    }
    debug!(
        samples,
        triangles = mesh.triangle_count(),
        "triangulated cross-section"
    );

    Ok(mesh)
}

/// Project points onto the disc plane and rescale into the unit square.
fn planar_uvs(
    points: &[Point3<f64>],
    centroid: &Point3<f64>,
    radial: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> Vec<Vector2<f64>> {
    let u_axis = radial.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::x);
    let v_axis = normal.cross(&u_axis);

    let projected: Vec<Vector2<f64>> = points
        .iter()
        .map(|p| {
            let d = p - centroid;
            Vector2::new(d.dot(&u_axis), d.dot(&v_axis))
        })
        .collect();

    let (min, max) = projected.iter().fold(
        (Vector2::repeat(f64::INFINITY), Vector2::repeat(f64::NEG_INFINITY)),
        |(lo, hi), p| (lo.inf(p), hi.sup(p)),
    );
    let extent = max - min;

    projected
        .iter()
        .map(|p| {
            let rel = p - min;
            Vector2::new(
                if extent.x > f64::EPSILON { rel.x / extent.x } else { 0.0 },
                if extent.y > f64::EPSILON { rel.y / extent.y } else { 0.0 },
            )
        })
        .collect()
}
