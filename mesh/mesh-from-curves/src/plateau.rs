//! Stacked, wavy, shrinking plateau layers.
//!
//! Each layer is a closed wavy ring swept up a short vertical spline and
//! closed with a flat top. Layers shrink by a random factor as they climb.

use curve_types::{Bezier, smooth_spline};
use mesh_types::MeshBuffer;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use std::f64::consts::TAU;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cap::{FanTriangulator, triangulate_cross_section};
use crate::error::LoftResult;
use crate::loft::{Loft, MIN_PATH_SEGMENTS};

/// Number of knots in every layer's base ring.
pub const RING_KNOTS: usize = 32;

/// Configuration for [`layered_plateau`].
///
/// Ranges are `(min, max)` pairs; each draw picks a value between them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlateauConfig {
    /// Number of stacked layers.
    pub layer_count: usize,
    /// Ring segments of the bottom layer; upper layers scale this down.
    pub radius_segments: usize,
    /// Segments along each layer's height.
    pub height_segments: usize,
    /// Radius of the bottom layer.
    pub base_radius: (f64, f64),
    /// Factor applied to radius, height and ring segments per layer.
    pub scale_down: (f64, f64),
    /// Height of one layer before scaling.
    pub layer_height: (f64, f64),
    /// Ring centre jitter, relative to the ring size.
    pub center_jitter: f64,
    /// Fraction by which ring knots may be pulled towards the centre.
    pub waviness: f64,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            layer_count: 3,
            radius_segments: 24,
            height_segments: 2,
            base_radius: (10.0, 12.0),
            scale_down: (0.8, 0.8),
            layer_height: (2.0, 5.0),
            center_jitter: 0.1,
            waviness: 0.25,
        }
    }
}

impl PlateauConfig {
    /// Set the number of layers.
    #[must_use]
    pub const fn with_layer_count(mut self, count: usize) -> Self {
        self.layer_count = count;
        self
    }

    /// Set the bottom layer's ring segments.
    #[must_use]
    pub const fn with_radius_segments(mut self, segments: usize) -> Self {
        self.radius_segments = segments;
        self
    }

    /// Set the segments along each layer's height.
    #[must_use]
    pub const fn with_height_segments(mut self, segments: usize) -> Self {
        self.height_segments = segments;
        self
    }

    /// Set the bottom radius range.
    #[must_use]
    pub const fn with_base_radius(mut self, min: f64, max: f64) -> Self {
        self.base_radius = (min, max);
        self
    }

    /// Set the per-layer shrink range.
    #[must_use]
    pub const fn with_scale_down(mut self, min: f64, max: f64) -> Self {
        self.scale_down = (min, max);
        self
    }

    /// Set the layer height range.
    #[must_use]
    pub const fn with_layer_height(mut self, min: f64, max: f64) -> Self {
        self.layer_height = (min, max);
        self
    }

    /// Set the centre jitter.
    #[must_use]
    pub const fn with_center_jitter(mut self, jitter: f64) -> Self {
        self.center_jitter = jitter;
        self
    }

    /// Set the ring waviness.
    #[must_use]
    pub const fn with_waviness(mut self, waviness: f64) -> Self {
        self.waviness = waviness;
        self
    }
}

/// Generate a layered plateau.
///
/// Randomness comes entirely from `rng`, so a seeded generator gives the same
/// mesh every time. Layers whose ring would have two or fewer segments are
/// skipped, though they still consume their random draws.
///
/// # Errors
///
/// Propagates spline or loft construction errors.
///
/// # Example
///
/// ```
/// use mesh_from_curves::{PlateauConfig, layered_plateau};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mesh = layered_plateau(&PlateauConfig::default(), &mut rng).unwrap();
/// assert!(mesh.validate().is_ok());
/// assert!(mesh.triangle_count() > 0);
/// ```
pub fn layered_plateau<R: Rng + ?Sized>(config: &PlateauConfig, rng: &mut R) -> LoftResult<MeshBuffer> {
    let mut mesh = MeshBuffer::new();
    let mut total_height = 0.0;
    let mut scale = 1.0;

    for layer in 0..config.layer_count {
        let radius = draw(rng, config.base_radius) * scale;
        let ring = wavy_ring(config, radius * scale, rng)?;

        let floor = total_height;
        total_height += draw(rng, config.layer_height) * scale;
        let rise = smooth_spline(
            &[Point3::new(0.0, floor, 0.0), Point3::new(0.0, total_height, 0.0)],
            false,
        )?;

        let ring_segments = (config.radius_segments as f64 * scale) as usize;
        if config.height_segments >= MIN_PATH_SEGMENTS && ring_segments > 2 {
            let side = Loft::new(&rise, &ring).generate_mesh(config.height_segments, ring_segments)?;
            mesh.merge(&side);

            let top = triangulate_cross_section(
                &ring,
                ring_segments,
                Vector3::y() * total_height,
                &FanTriangulator,
            )?;
            mesh.merge(&top);
        } else {
            warn!(
                layer,
                height_segments = config.height_segments,
                ring_segments,
                "skipping plateau layer with too few segments"
            );
        }

        scale *= draw(rng, config.scale_down);
    }

    debug!(
        layers = config.layer_count,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        height = total_height,
        "generated layered plateau"
    );

    Ok(mesh)
}

/// A closed ring of [`RING_KNOTS`] knots in the XZ plane with random dents.
fn wavy_ring<R: Rng + ?Sized>(config: &PlateauConfig, size: f64, rng: &mut R) -> LoftResult<Bezier> {
    let jitter_x = lerp(-1.0, 1.0, size * config.center_jitter * unit(rng));
    let jitter_z = lerp(-1.0, 1.0, size * config.center_jitter * unit(rng));
    let center = Vector3::new(jitter_x, 0.0, jitter_z);

    let step = -TAU / RING_KNOTS as f64;
    let knots: Vec<Point3<f64>> = (0..RING_KNOTS)
        .map(|i| {
            let angle = i as f64 * step;
            let x = lerp(0.0, angle.sin() * size, 1.0 - config.waviness * unit(rng));
            let z = lerp(0.0, angle.cos() * size, 1.0 - config.waviness * unit(rng));
            Point3::new(x, 0.0, z) + center
        })
        .collect();

    Ok(smooth_spline(&knots, true)?)
}

/// Uniform draw in `[0, 1)`.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Uniform draw between the ends of `range`.
fn draw<R: Rng + ?Sized>(rng: &mut R, range: (f64, f64)) -> f64 {
    lerp(range.0, range.1, unit(rng))
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
