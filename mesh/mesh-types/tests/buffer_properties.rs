//! Property-based tests for mesh buffer invariants.
//!
//! Run with: cargo test -p mesh-types -- proptest

use mesh_types::{MeshBuffer, Point3, Vector2, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random buffers
// =============================================================================

fn arb_position() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A buffer whose indices are always in range.
fn arb_buffer(max_vertices: usize, max_triangles: usize) -> impl Strategy<Value = MeshBuffer> {
    prop::collection::vec(arb_position(), 3..=max_vertices).prop_flat_map(move |positions| {
        let n = positions.len() as u32;
        prop::collection::vec(prop::array::uniform3(0..n), 0..=max_triangles).prop_map(
            move |triangles| {
                let mut mesh = MeshBuffer::new();
                for p in &positions {
                    mesh.push_vertex(*p, Vector3::y(), Vector2::zeros());
                }
                for t in triangles {
                    mesh.push_triangle(t);
                }
                mesh
            },
        )
    })
}

proptest! {
    #[test]
    fn generated_buffers_validate(mesh in arb_buffer(30, 40)) {
        prop_assert!(mesh.validate().is_ok());
        prop_assert_eq!(mesh.triangles().count(), mesh.triangle_count());
    }

    #[test]
    fn merge_preserves_invariants(a in arb_buffer(20, 20), b in arb_buffer(20, 20)) {
        let mut merged = a.clone();
        merged.merge(&b);

        prop_assert!(merged.validate().is_ok());
        prop_assert_eq!(merged.vertex_count(), a.vertex_count() + b.vertex_count());
        prop_assert_eq!(merged.triangle_count(), a.triangle_count() + b.triangle_count());
        prop_assert!((merged.surface_area() - a.surface_area() - b.surface_area()).abs() < 1e-6);
    }

    #[test]
    fn translate_moves_bounds(mesh in arb_buffer(20, 10), dx in -50.0..50.0f64) {
        let before = mesh.bounds();
        let mut moved = mesh;
        moved.translate(Vector3::new(dx, 0.0, 0.0));
        let after = moved.bounds();

        prop_assert!((after.min.x - before.min.x - dx).abs() < 1e-9);
        prop_assert!((after.max.y - before.max.y).abs() < 1e-12);
    }
}
