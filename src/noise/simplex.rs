//! Scalar noise oracle used by terrain and biome synthesis.

use glam::Vec3;
use simdnoise::NoiseBuilder;

/// Deterministic scalar noise over 3D space with values in [-1, 1].
///
/// Everything downstream samples noise by sphere direction only, so
/// adjacent faces agree along shared edges.
pub trait Noise3D: Send + Sync {
    fn sample(&self, point: Vec3) -> f32;
}

/// Gain applied to simdnoise's 4D simplex.
///
/// simdnoise returns the raw kernel sum (falloff radius² 0.5, no output
/// scaling), which stays within about ±0.03. This factor brings sampled
/// extremes to roughly ±0.9; the final clamp catches rare overshoot.
pub const SIMPLEX_4D_GAIN: f32 = 30.0;

/// Seeded simplex noise backed by simdnoise, rescaled to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplexNoise {
    seed: i32,
}

impl SimplexNoise {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    /// Folds a 64-bit generation seed into the 32-bit seed simdnoise takes.
    pub fn from_seed(seed: u64) -> Self {
        Self::new((seed ^ (seed >> 32)) as i32)
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }
}

impl Noise3D for SimplexNoise {
    fn sample(&self, point: Vec3) -> f32 {
        // 4D simplex with w fixed at 0; a single-octave fbm is one raw lookup.
        let raw = NoiseBuilder::fbm_4d_offset(point.x, 1, point.y, 1, point.z, 1, 0.0, 1)
            .with_seed(self.seed)
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0];
        (raw * SIMPLEX_4D_GAIN).clamp(-1.0, 1.0)
    }
}
