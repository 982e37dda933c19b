//! Mesh buffer types for procedural geometry.
//!
//! This crate provides the output side of curve-driven mesh generation:
//!
//! - [`MeshBuffer`] - Parallel position/normal/UV arrays plus a flat triangle index list
//! - [`Triangle`] - A resolved triangle for face normal and centroid queries
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with +Y up.
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshBuffer, Point3, Vector2, Vector3};
//!
//! let mut mesh = MeshBuffer::new();
//! let a = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::zeros());
//! let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::x());
//! let c = mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z(), Vector2::y());
//! mesh.push_triangle([a, b, c]);
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]

mod bounds;
mod buffer;
mod error;
mod triangle;

pub use bounds::Aabb;
pub use buffer::MeshBuffer;
pub use error::{MeshError, MeshResult};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
