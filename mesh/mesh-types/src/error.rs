//! Error types for mesh buffer validation.

use thiserror::Error;

/// Result type for mesh buffer operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Ways a [`MeshBuffer`](crate::MeshBuffer) can be internally inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A per-vertex attribute array is not parallel to the positions.
    #[error("{attribute} has {actual} entries, expected {expected} (one per vertex)")]
    LengthMismatch {
        /// Name of the offending attribute array.
        attribute: &'static str,
        /// Vertex count.
        expected: usize,
        /// Attribute count.
        actual: usize,
    },

    /// The index list does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriple(usize),

    /// A triangle corner points past the end of the vertex arrays.
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position within the flat index list.
        position: usize,
        /// The offending index value.
        index: u32,
        /// Number of vertices in the buffer.
        vertex_count: usize,
    },
}
