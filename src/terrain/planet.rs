//! Planet container: the three same-resolution output cubemaps.

use super::cubemap::CubemapData;
use super::surface::NOMINAL_RADIUS;

/// Channels in the height map.
pub const HEIGHT_CHANNELS: usize = 1;
/// Channels in the normal map (encoded xyz).
pub const NORMAL_CHANNELS: usize = 3;
/// Channels in the biome splat map (tundra, shrub, grass, forest).
pub const SPLAT_CHANNELS: usize = 4;

/// Represents a procedurally generated planet.
#[derive(Debug, Clone)]
pub struct Planet {
    /// Master random seed for generation.
    pub seed: u64,
    /// Height offsets from the nominal radius, one channel.
    pub height: CubemapData,
    /// Outward normals remapped to [0, 1], three channels.
    pub normal: CubemapData,
    /// Biome blend weights, four channels.
    pub splat: CubemapData,
}

impl Planet {
    /// Creates a planet whose heights all sit at the nominal radius offset
    /// (0.5, a unit sphere) with empty normal and splat maps.
    ///
    /// # Arguments
    /// * `resolution` - Width/height of each cube face in pixels
    /// * `seed` - Random seed for reproducible generation
    pub fn new(resolution: u32, seed: u64) -> Self {
        Self {
            seed,
            height: CubemapData::filled(resolution, HEIGHT_CHANNELS, NOMINAL_RADIUS),
            normal: CubemapData::new(resolution, NORMAL_CHANNELS),
            splat: CubemapData::new(resolution, SPLAT_CHANNELS),
        }
    }

    /// Returns the resolution of each face (all maps share it).
    pub fn resolution(&self) -> u32 {
        self.height.resolution()
    }

    /// Computes the global min and max height values across all faces.
    pub fn height_range(&self) -> (f32, f32) {
        self.height.range(0)
    }
}
