//! Parallel-array triangle mesh buffers.

use crate::{Aabb, MeshError, MeshResult, Triangle};
use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh stored as parallel vertex arrays plus a flat index list.
///
/// # Memory Layout
///
/// - `positions`, `normals`, `uvs`: one entry per vertex, positionally parallel
/// - `indices`: three entries per triangle, each `< vertex_count()`
///
/// # Winding Order
///
/// Triangles use **counter-clockwise winding seen from the front face**, so
/// the right-hand-rule face normal points out of the surface.
///
/// Buffers are produced whole by a generator and handed to the caller; there
/// is no incremental editing contract beyond [`Self::merge`] and [`Self::translate`].
///
/// # Example
///
/// ```
/// use mesh_types::{MeshBuffer, Point3, Vector2, Vector3};
///
/// let mut mesh = MeshBuffer::new();
/// mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::y(), Vector2::new(0.0, 0.0));
/// mesh.push_vertex(Point3::new(0.0, 0.0, 1.0), Vector3::y(), Vector2::new(0.0, 1.0));
/// mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::y(), Vector2::new(1.0, 0.0));
/// mesh.push_triangle([0, 1, 2]);
///
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.validate().is_ok());
/// assert!(mesh.face_normal(0).unwrap().y > 0.99);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuffer {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Unit vertex normals, parallel to `positions`.
    pub normals: Vec<Vector3<f64>>,
    /// Texture coordinates, parallel to `positions`.
    pub uvs: Vec<Vector2<f64>>,
    /// Triangle corners, three per triangle.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// An empty buffer.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// An empty buffer with room for `vertex_count` vertices and `triangle_count` triangles.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Append one vertex and return its index.
    pub fn push_vertex(
        &mut self,
        position: Point3<f64>,
        normal: Vector3<f64>,
        uv: Vector2<f64>,
    ) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, corners: [u32; 3]) {
        self.indices.extend_from_slice(&corners);
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles in the index list.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if there is nothing to draw.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corner indices of triangle `tri`.
    #[must_use]
    pub fn triangle_indices(&self, tri: usize) -> Option<[u32; 3]> {
        let start = tri.checked_mul(3)?;
        match self.indices.get(start..start.checked_add(3)?)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Resolved corner positions of triangle `tri`.
    ///
    /// `None` if `tri` is past the end or references a missing vertex.
    #[must_use]
    pub fn triangle(&self, tri: usize) -> Option<Triangle> {
        let [a, b, c] = self.triangle_indices(tri)?;
        Some(Triangle::new(
            *self.positions.get(a as usize)?,
            *self.positions.get(b as usize)?,
            *self.positions.get(c as usize)?,
        ))
    }

    /// Iterate over every triangle's resolved positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).filter_map(|tri| self.triangle(tri))
    }

    /// Unit face normal of triangle `tri`, `None` if missing or degenerate.
    #[must_use]
    pub fn face_normal(&self, tri: usize) -> Option<Vector3<f64>> {
        self.triangle(tri)?.normal()
    }

    /// Centroid of triangle `tri`.
    #[must_use]
    pub fn face_center(&self, tri: usize) -> Option<Point3<f64>> {
        self.triangle(tri).map(|t| t.centroid())
    }

    /// Bounds of all vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Append `other`, shifting its indices past this buffer's vertices.
    pub fn merge(&mut self, other: &Self) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
    }

    /// Check the parallel-array and index-range invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`MeshError`] found.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.positions.len();

        for (attribute, actual) in [("normals", self.normals.len()), ("uvs", self.uvs.len())] {
            if actual != vertex_count {
                return Err(MeshError::LengthMismatch {
                    attribute,
                    expected: vertex_count,
                    actual,
                });
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriple(self.indices.len()));
        }

        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }

        Ok(())
    }
}
