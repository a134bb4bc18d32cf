//! Biome classification into splat-map blend weights.
//!
//! Temperature falls off toward the poles and rainfall peaks at mid
//! latitudes; a fixed piecewise-linear table turns the pair into weights for
//! tundra, shrub, grass and forest. The weights are not normalized: whatever
//! is left of 1 is bare ground for the shader.

mod config;

pub use config::BiomeConfig;

use glam::Vec3;
use rayon::prelude::*;

use crate::noise::Noise3D;
use crate::terrain::CubemapData;

/// Blend weights of the four ground covers at one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiomeWeights {
    pub tundra: f32,
    pub shrub: f32,
    pub grass: f32,
    pub forest: f32,
}

impl BiomeWeights {
    /// Weights in splat channel order.
    pub fn to_array(self) -> [f32; 4] {
        [self.tundra, self.shrub, self.grass, self.forest]
    }

    pub fn total(self) -> f32 {
        self.tundra + self.shrub + self.grass + self.forest
    }
}

/// Climate at a sphere direction, before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    pub temperature: f32,
    pub rainfall: f32,
}

/// Temperature and rainfall at unit direction `direction`.
///
/// `T` is the polar angle from +Y. Temperature is `1 - cos²T` and rainfall
/// `sin²(2T)`, each plus scaled noise and clamped to [0, 1].
pub fn climate_at<N: Noise3D + ?Sized>(direction: Vec3, noise: &N, config: &BiomeConfig) -> Climate {
    let p = direction.normalize_or_zero();
    let cos_t = p.y.clamp(-1.0, 1.0);
    let sin_2t = (2.0 * cos_t.acos()).sin();
    let offset = config.noise_offset();

    let temperature = 1.0 - cos_t * cos_t
        + config.temperature_noise * noise.sample(config.temperature_frequency * p + offset);
    let rainfall = sin_2t * sin_2t
        + config.rainfall_noise * noise.sample(config.rainfall_frequency * p + offset);

    Climate {
        temperature: temperature.clamp(0.0, 1.0),
        rainfall: rainfall.clamp(0.0, 1.0),
    }
}

/// Maps a climate to ground-cover weights.
pub fn classify_climate(climate: Climate, config: &BiomeConfig) -> BiomeWeights {
    let tundra = (0.5 - (climate.temperature - config.tundra_temperature) / config.tundra_transition)
        .clamp(0.0, 1.0);
    let rest = 1.0 - tundra;
    let (mut shrub, mut grass, mut forest) = (rest, rest, rest);

    let r = climate.rainfall;
    let [dry, shrub_grass, grass_only, grass_forest] = config.rainfall_bands;
    let blend_at = |centre: f32| (0.5 - (r - centre) / config.blend_width).clamp(0.0, 1.0);
    if r < dry {
        grass = 0.0;
        forest = 0.0;
    } else if r < shrub_grass {
        let blend = blend_at(config.shrub_grass_centre);
        shrub *= blend;
        grass *= 1.0 - blend;
        forest = 0.0;
    } else if r < grass_only {
        shrub = 0.0;
        forest = 0.0;
    } else if r < grass_forest {
        let blend = blend_at(config.grass_forest_centre);
        shrub = 0.0;
        grass *= blend;
        forest *= 1.0 - blend;
    } else {
        shrub = 0.0;
        grass = 0.0;
    }

    BiomeWeights {
        tundra,
        shrub,
        grass,
        forest,
    }
}

/// Ground-cover weights at sphere direction `direction`.
pub fn classify_biome<N: Noise3D + ?Sized>(
    direction: Vec3,
    noise: &N,
    config: &BiomeConfig,
) -> BiomeWeights {
    classify_climate(climate_at(direction, noise, config), config)
}

/// Fills the 4-channel `splat` map with biome weights, one rayon task per face.
pub fn generate_biomes<N: Noise3D>(splat: &mut CubemapData, noise: &N, config: &BiomeConfig) {
    debug_assert!(splat.channels() >= 4, "splat map needs 4 channels");
    splat.par_faces_mut().for_each(|mut face| {
        let resolution = face.resolution();
        for j in 0..resolution {
            for i in 0..resolution {
                let weights = classify_biome(face.pixel_direction(i, j), noise, config);
                for (c, w) in weights.to_array().into_iter().enumerate() {
                    face.set(i, j, c, w);
                }
            }
        }
    });
}
