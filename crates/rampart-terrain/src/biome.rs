//! Two-way biome split driven by an independent noise field.

use noise::{NoiseFn, Value};
use rampart_config::BiomeConfig;

use crate::noise_field::unit_interval;
use crate::seed::{SeedStream, noise_seed};

/// Normalized noise values below this are vegetated, the rest arid.
pub const ARID_THRESHOLD: f64 = 0.5;

/// Biome category of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Grass on top, dirt on the sides.
    Vegetated,
    /// Sand on top and sides.
    Arid,
}

/// Samples a single octave of value noise and thresholds it into a [`Biome`].
///
/// Pure and deterministic for a given seed, so the mesher can recompute
/// biomes per face instead of storing a second grid.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    noise: Option<Value>,
    scale: f64,
    offset: [f64; 2],
}

impl BiomeClassifier {
    /// Creates a classifier from config, drawing its permutation seed from
    /// the world seed's biome stream.
    pub fn new(config: &BiomeConfig, world_seed: u64) -> Self {
        let noise = config
            .enabled
            .then(|| Value::new(noise_seed(world_seed, SeedStream::BiomeNoise)));
        Self {
            noise,
            scale: config.scale,
            offset: config.offset,
        }
    }

    /// A classifier that reports [`Biome::Vegetated`] everywhere.
    pub fn disabled() -> Self {
        Self {
            noise: None,
            scale: 0.0,
            offset: [0.0; 2],
        }
    }

    /// Normalized noise in `[0, 1]`, or `None` when disabled.
    pub fn sample(&self, x: i32, z: i32) -> Option<f64> {
        let noise = self.noise.as_ref()?;
        let raw = noise.get([
            (x as f64 + self.offset[0]) * self.scale,
            (z as f64 + self.offset[1]) * self.scale,
        ]);
        Some(unit_interval(raw))
    }

    /// Biome of the column at `(x, z)`.
    pub fn biome(&self, x: i32, z: i32) -> Biome {
        match self.sample(x, z) {
            Some(n) if n >= ARID_THRESHOLD => Biome::Arid,
            _ => Biome::Vegetated,
        }
    }
}
