//! Multi-octave fractal and ridge sums, and the blended terrain height field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::simplex::Noise3D;

/// Octave stack parameters for a fractal sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OctaveConfig {
    /// Frequency of the first octave.
    pub frequency: f32,
    /// Number of octaves summed.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f32,
    /// Frequency multiplier between octaves.
    pub multiplier: f32,
}

impl OctaveConfig {
    pub const fn new(frequency: f32, octaves: u32, persistence: f32, multiplier: f32) -> Self {
        Self {
            frequency,
            octaves,
            persistence,
            multiplier,
        }
    }
}

/// Ridge transform of a single noise lookup: `1 - 2|n|`, in [-1, 1].
#[inline]
pub fn ridge_noise<N: Noise3D + ?Sized>(noise: &N, point: Vec3) -> f32 {
    1.0 - 2.0 * noise.sample(point).abs()
}

/// Unnormalized fractal sum `Σ a_k · n(f_k · p)`, starting at amplitude 1.
pub fn fractal_noise<N: Noise3D + ?Sized>(noise: &N, point: Vec3, octaves: &OctaveConfig) -> f32 {
    octave_sum(point, octaves, |p| noise.sample(p))
}

/// Fractal sum of [`ridge_noise`] lookups.
pub fn fractal_ridge_noise<N: Noise3D + ?Sized>(
    noise: &N,
    point: Vec3,
    octaves: &OctaveConfig,
) -> f32 {
    octave_sum(point, octaves, |p| ridge_noise(noise, p))
}

fn octave_sum(point: Vec3, octaves: &OctaveConfig, mut f: impl FnMut(Vec3) -> f32) -> f32 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = octaves.frequency;
    for _ in 0..octaves.octaves {
        total += amplitude * f(frequency * point);
        amplitude *= octaves.persistence;
        frequency *= octaves.multiplier;
    }
    total
}

/// Parameters of the blended ridge/smooth height field.
///
/// `h = base_height + amplitude · (blend · ridge + (1 - blend) · smooth)`
/// where `blend = 0.5 · (n(p) + 1)` and `smooth` is scaled by
/// `smooth_amplitude`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainNoiseConfig {
    /// Nominal height the noise is added to.
    pub base_height: f32,
    /// Overall scale of the noise term.
    pub amplitude: f32,
    /// Scale applied to the smooth component before blending.
    pub smooth_amplitude: f32,
    /// Octaves of the ridged component.
    pub ridge: OctaveConfig,
    /// Octaves of the smooth component.
    pub smooth: OctaveConfig,
}

impl Default for TerrainNoiseConfig {
    fn default() -> Self {
        Self {
            base_height: 0.5,
            amplitude: 0.1,
            smooth_amplitude: 0.05,
            ridge: OctaveConfig::new(2.0, 4, 0.5, 2.0),
            smooth: OctaveConfig::new(4.0, 4, 0.7, 2.0),
        }
    }
}

impl TerrainNoiseConfig {
    /// A config with no relief: every sample returns `base_height`.
    pub fn flat() -> Self {
        Self {
            amplitude: 0.0,
            ..Default::default()
        }
    }

    /// Height at unit sphere direction `direction`.
    pub fn height_at<N: Noise3D + ?Sized>(&self, noise: &N, direction: Vec3) -> f32 {
        let ridge = fractal_ridge_noise(noise, direction, &self.ridge);
        let smooth = self.smooth_amplitude * fractal_noise(noise, direction, &self.smooth);
        let blend = 0.5 * (noise.sample(direction) + 1.0);
        self.base_height + self.amplitude * (blend * ridge + (1.0 - blend) * smooth)
    }
}
