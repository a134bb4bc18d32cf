//! Biome configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for the climate fields behind biome classification.
///
/// Temperature and rainfall are both unitless in [0, 1]; each is a
/// latitude term plus a scaled noise lookup at
/// `frequency · p + noise_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Scale of the noise added to temperature.
    pub temperature_noise: f32,
    /// Noise frequency for temperature.
    pub temperature_frequency: f32,
    /// Scale of the noise added to rainfall.
    pub rainfall_noise: f32,
    /// Noise frequency for rainfall.
    pub rainfall_frequency: f32,
    /// Offset of both noise lookups, decorrelating them from the terrain.
    pub noise_offset: [f32; 3],

    /// Temperature at which tundra weight crosses 0.5.
    pub tundra_temperature: f32,
    /// Half-width of the tundra transition in temperature.
    pub tundra_transition: f32,

    /// Upper rainfall edges of the dry, shrub/grass, grass and grass/forest
    /// bands; wetter than the last edge is pure forest.
    pub rainfall_bands: [f32; 4],
    /// Rainfall where shrub and grass weigh equally.
    pub shrub_grass_centre: f32,
    /// Rainfall where grass and forest weigh equally.
    pub grass_forest_centre: f32,
    /// Rainfall width over which a blend goes from one cover to the other.
    pub blend_width: f32,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            temperature_noise: 0.1,
            temperature_frequency: 5.0,
            rainfall_noise: 0.4,
            rainfall_frequency: 3.0,
            noise_offset: [0.0, 15.0, 0.0],

            tundra_temperature: 0.3,
            tundra_transition: 0.1,

            rainfall_bands: [0.1, 0.3, 0.5, 0.7],
            shrub_grass_centre: 0.2,
            grass_forest_centre: 0.6,
            blend_width: 0.2,
        }
    }
}

impl BiomeConfig {
    pub fn noise_offset(&self) -> Vec3 {
        Vec3::from_array(self.noise_offset)
    }
}
