//! Property-based tests for smooth spline construction.
//!
//! Run with: cargo test -p curve-types -- proptest

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use curve_types::{Curve, smooth_spline};
use nalgebra::Point3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn arb_points(max: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(arb_point(), 2..=max)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn interior_handles_reflect_through_knot(points in arb_points(12), closed in any::<bool>()) {
        let spline = smooth_spline(&points, closed).unwrap();
        let knots = spline.control_points();

        for cp in &knots[1..knots.len() - 1] {
            let inward = cp.in_tangent - cp.point;
            let outward = cp.out_tangent - cp.point;
            prop_assert!((inward + outward).norm() < 1e-4);
        }
    }

    #[test]
    fn open_spline_passes_through_every_point(points in arb_points(10)) {
        let spline = smooth_spline(&points, false).unwrap();
        let last = (points.len() - 1) as f64;

        for (i, p) in points.iter().enumerate() {
            let sample = spline.position_sample(i as f64 / last);
            prop_assert!((sample - p).norm() < 1e-4);
        }
    }

    #[test]
    fn closed_spline_starts_and_ends_on_first_point(points in arb_points(10)) {
        let spline = smooth_spline(&points, true).unwrap();

        prop_assert_eq!(spline.knot_count(), points.len() + 1);
        prop_assert!((spline.position_sample(0.0) - points[0]).norm() < 1e-4);
        prop_assert!((spline.position_sample(1.0) - points[0]).norm() < 1e-4);
    }

    #[test]
    fn forward_is_unit_or_fallback(points in arb_points(8), t in 0.0..=1.0f64) {
        let spline = smooth_spline(&points, false).unwrap();
        let forward = spline.forward_sample(t);
        prop_assert!((forward.norm() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn closed_spline_forward_matches_at_seam() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 1.0, 0.0),
        Point3::new(3.0, 5.0, 2.0),
        Point3::new(-1.0, 3.0, 1.0),
    ];
    let spline = smooth_spline(&points, true).unwrap();
    assert_relative_eq!(
        spline.forward_sample(0.0),
        spline.forward_sample(1.0),
        epsilon = 1e-10
    );
}
