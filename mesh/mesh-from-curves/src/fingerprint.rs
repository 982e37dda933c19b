//! Content fingerprints and memoized loft regeneration.
//!
//! A [`Fingerprint`] hashes the exact bit patterns of every input coordinate,
//! segment count and flag with XXH3, so any edit to a point list is seen even
//! when the list keeps its length. [`LoftCache`] compares fingerprints to
//! decide whether a mesh needs rebuilding.

use curve_types::{Bezier, Point3, smooth_spline};
use mesh_types::MeshBuffer;
use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LoftResult;
use crate::loft::{Loft, LoftConfig};

/// A 64-bit content hash of generator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fingerprint(pub u64);

/// Incremental fingerprint builder.
///
/// Floats are fed as their IEEE-754 bits, so `0.0` and `-0.0` hash apart.
pub struct Fingerprinter {
    hasher: Xxh3,
}

impl Fingerprinter {
    /// Start an empty fingerprint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Feed one float.
    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.hasher.update(&value.to_bits().to_le_bytes());
        self
    }

    /// Feed a count or size.
    pub fn usize(&mut self, value: usize) -> &mut Self {
        self.hasher.update(&(value as u64).to_le_bytes());
        self
    }

    /// Feed a flag.
    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.hasher.update(&[u8::from(value)]);
        self
    }

    /// Feed a length-prefixed point list.
    pub fn points(&mut self, points: &[Point3<f64>]) -> &mut Self {
        self.usize(points.len());
        for p in points {
            self.f64(p.x).f64(p.y).f64(p.z);
        }
        self
    }

    /// The fingerprint of everything fed so far.
    #[must_use]
    pub fn finish(&self) -> Fingerprint {
        Fingerprint(self.hasher.digest())
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Authored input for a smooth spline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplineSource {
    /// Points the spline passes through.
    pub points: Vec<Point3<f64>>,
    /// Whether the spline loops back to its first point.
    pub closed: bool,
}

impl SplineSource {
    /// Spline input from points and a closed flag.
    #[must_use]
    pub fn new(points: Vec<Point3<f64>>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Content fingerprint of the points and flag.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut fp = Fingerprinter::new();
        self.feed(&mut fp);
        fp.finish()
    }

    /// Build the spline.
    ///
    /// # Errors
    ///
    /// Fails when fewer than two points are present.
    pub fn build(&self) -> LoftResult<Bezier> {
        Ok(smooth_spline(&self.points, self.closed)?)
    }

    fn feed(&self, fp: &mut Fingerprinter) {
        fp.points(&self.points).bool(self.closed);
    }
}

/// Authored input for a loft: two splines and a configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoftSource {
    /// Path the shape is swept along.
    pub path: SplineSource,
    /// Cross-section shape.
    pub shape: SplineSource,
    /// Segment counts and hooks.
    pub config: LoftConfig,
}

impl LoftSource {
    /// Loft input from its parts.
    #[must_use]
    pub fn new(path: SplineSource, shape: SplineSource, config: LoftConfig) -> Self {
        Self {
            path,
            shape,
            config,
        }
    }

    /// Content fingerprint over both splines and every config field.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut fp = Fingerprinter::new();
        self.path.feed(&mut fp);
        self.shape.feed(&mut fp);
        fp.usize(self.config.path_segments)
            .usize(self.config.shape_segments)
            .f64(self.config.banking)
            .bool(self.config.start_cap)
            .bool(self.config.end_cap);
        fp.finish()
    }

    /// Build both splines and loft them.
    ///
    /// # Errors
    ///
    /// Propagates spline and loft construction errors.
    pub fn generate(&self) -> LoftResult<MeshBuffer> {
        let path = self.path.build()?;
        let shape = self.shape.build()?;
        Loft::new(&path, &shape).generate_with(&self.config)
    }
}

/// Keeps the last generated loft and rebuilds only when its inputs change.
#[derive(Debug, Clone, Default)]
pub struct LoftCache {
    entry: Option<(Fingerprint, MeshBuffer)>,
}

impl LoftCache {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Return the mesh for `source`, regenerating only on a fingerprint change.
    ///
    /// A successful regeneration replaces the previous mesh. A failed one
    /// leaves the cache as it was.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`LoftSource::generate`].
    pub fn get_or_generate(&mut self, source: &LoftSource) -> LoftResult<&MeshBuffer> {
        let fingerprint = source.fingerprint();

        let entry = match self.entry.take() {
            Some(entry) if entry.0 == fingerprint => {
                debug!(fingerprint = fingerprint.0, "loft cache hit");
                entry
            }
            previous => {
                debug!(fingerprint = fingerprint.0, "loft cache miss, regenerating");
                match source.generate() {
                    Ok(mesh) => (fingerprint, mesh),
                    Err(err) => {
                        self.entry = previous;
                        return Err(err);
                    }
                }
            }
        };

        Ok(&self.entry.insert(entry).1)
    }

    /// Fingerprint of the cached mesh, if any.
    #[must_use]
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.entry.as_ref().map(|(fp, _)| *fp)
    }

    /// The cached mesh, if any.
    #[must_use]
    pub fn mesh(&self) -> Option<&MeshBuffer> {
        self.entry.as_ref().map(|(_, mesh)| mesh)
    }

    /// Drop the cached mesh so the next request regenerates.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
