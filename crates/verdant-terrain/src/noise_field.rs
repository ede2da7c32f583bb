//! Seeded 2D coherent noise.

use std::fmt;

use noise::{NoiseFn, Perlin};

/// A deterministic 2D Perlin noise field.
///
/// The seed is fixed at construction; there is no other state. Independent
/// fields with different seeds can coexist.
pub struct NoiseField {
    seed: u32,
    perlin: Perlin,
}

impl NoiseField {
    /// Create a field from a fixed seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// The seed this field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field at `(x, y)`.
    ///
    /// Continuous in both inputs and clamped to `[-1, 1]`.
    #[inline]
    pub fn perlin2(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y]).clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
