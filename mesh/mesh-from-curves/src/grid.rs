//! Vertex grid layout shared by the loft mesher and its normal repair.

/// Layout of a loft's `(path_segments + 1) × (shape_segments + 1)` vertex grid.
///
/// Rings run along the path; each ring holds one vertex per shape step plus a
/// trailing duplicate column. Vertex `(s, p)` lives at `p * (shape_segments + 1) + s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingGrid {
    /// Number of path intervals (`rings - 1`).
    pub path_segments: usize,
    /// Number of shape intervals wrapped by triangles.
    pub shape_segments: usize,
}

impl RingGrid {
    /// Grid for the given segment counts.
    #[must_use]
    pub const fn new(path_segments: usize, shape_segments: usize) -> Self {
        Self {
            path_segments,
            shape_segments,
        }
    }

    /// Vertices per ring.
    #[must_use]
    pub const fn ring_width(&self) -> usize {
        self.shape_segments + 1
    }

    /// Number of rings.
    #[must_use]
    pub const fn ring_count(&self) -> usize {
        self.path_segments + 1
    }

    /// Total vertex count.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.ring_width() * self.ring_count()
    }

    /// Total triangle count.
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.shape_segments * self.path_segments * 2
    }

    /// Buffer index of vertex `(shape, path)`.
    #[must_use]
    pub const fn index(&self, shape: usize, path: usize) -> usize {
        path * self.ring_width() + shape
    }

    /// Shape parameter of column `shape`.
    ///
    /// Columns are spread over `shape_segments - 1` intervals, so the last two
    /// columns both land on `t = 1`.
    #[must_use]
    pub fn shape_t(&self, shape: usize) -> f64 {
        let intervals = self.shape_segments.saturating_sub(1).max(1);
        (shape as f64 / intervals as f64).min(1.0)
    }

    /// Path parameter of ring `path`.
    #[must_use]
    pub fn path_t(&self, path: usize) -> f64 {
        if self.path_segments == 0 {
            return 0.0;
        }
        path as f64 / self.path_segments as f64
    }

    /// Index triples for every grid cell, two triangles per cell.
    ///
    /// Shape columns wrap at `shape_segments`, so the trailing duplicate column
    /// is never referenced.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.path_segments).flat_map(move |p| {
            (0..self.shape_segments).flat_map(move |s| {
                let next = (s + 1) % self.shape_segments;
                let here = self.index(s, p) as u32;
                let above = self.index(s, p + 1) as u32;
                let beside = self.index(next, p) as u32;
                let diagonal = self.index(next, p + 1) as u32;
                [[here, above, beside], [beside, above, diagonal]]
            })
        })
    }
}
