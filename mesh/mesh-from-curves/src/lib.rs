//! Generate triangle meshes from curves.
//!
//! This crate sweeps cross-section curves along path curves and builds the
//! composite primitives that sit on top of that:
//!
//! - **Lofting**: [`Loft`] and [`loft`] sweep a shape along a path into a
//!   [`MeshBuffer`] with smooth normals and UVs
//! - **Seam repair**: duplicated seam vertices of closed curves share their
//!   normals, so closed sweeps shade without a crease
//! - **Caps**: [`triangulate_cross_section`] fills a closed curve with a flat disc
//! - **Memoization**: [`LoftCache`] regenerates only when a content
//!   [`Fingerprint`] of the inputs changes
//! - **Primitives**: [`layered_plateau`] stacks wavy lofted layers
//!
//! # Quick Start
//!
//! ```
//! use curve_types::{Bezier, smooth_spline};
//! use mesh_from_curves::loft;
//! use nalgebra::Point3;
//!
//! let path = smooth_spline(
//!     &[
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(2.0, 5.0, 0.0),
//!         Point3::new(0.0, 10.0, 0.0),
//!     ],
//!     false,
//! )
//! .unwrap();
//! let shape = Bezier::circle(0.5);
//!
//! let mesh = loft(&path, &shape, 20, 12).unwrap();
//! assert_eq!(mesh.vertex_count(), 13 * 21);
//! assert!(mesh.validate().is_ok());
//! ```
//!
//! # Grid Layout
//!
//! A loft with `P` path segments and `S` shape segments has `P + 1` rings of
//! `S + 1` vertices. Vertex `(s, p)` is at index `p * (S + 1) + s`; see
//! [`RingGrid`]. UVs are `u = s / (S - 1)` (clamped to 1) and `v = p / P`.
//!
//! # Orientation
//!
//! Shapes are authored in their local XZ plane. Each ring rotates local +Y
//! onto the path's forward direction; see [`path_rotation`].

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::suboptimal_flops
)]

mod cap;
mod error;
mod fingerprint;
mod frame;
mod grid;
mod loft;
mod normals;
mod plateau;

pub use cap::{FanTriangulator, Triangulator, triangulate_cross_section};
pub use error::{LoftError, LoftResult};
pub use fingerprint::{Fingerprint, Fingerprinter, LoftCache, LoftSource, SplineSource};
pub use frame::{ANTIPARALLEL_TOLERANCE, RingFrame, path_rotation, up};
pub use grid::RingGrid;
pub use loft::{Loft, LoftConfig, MIN_PATH_SEGMENTS, MIN_SHAPE_SEGMENTS, loft};
pub use normals::{Seams, accumulate_face_normals, grid_normals};
pub use plateau::{PlateauConfig, RING_KNOTS, layered_plateau};

pub use mesh_types::MeshBuffer;
