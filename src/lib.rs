//! Procedural cube-sphere planet generator.
//!
//! Builds a unit sphere mesh from six spherified cube faces and fills three
//! cubemaps over the same faces: heights from fractal noise shaped by
//! particle hydraulic erosion, normals derived from those heights, and biome
//! blend weights from latitude and noise.
//!
//! ```no_run
//! use spheregen::{TerrainConfig, generate_planet};
//!
//! let config = TerrainConfig { resolution: 128, ..Default::default() };
//! let planet = generate_planet(&config).unwrap();
//! assert_eq!(planet.resolution(), 128);
//! ```

pub mod biomes;
pub mod config;
pub mod erosion;
pub mod export;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod terrain;

pub use biomes::{BiomeConfig, BiomeWeights};
pub use config::{ConfigError, TerrainConfig};
pub use erosion::{ErosionConfig, ErosionParameters, ErosionSimulator};
pub use geometry::{CubeFace, FaceCoord};
pub use mesh::{MeshVertex, SphereMesh, UvMode, build_sphere_mesh};
pub use noise::{Noise3D, SimplexNoise, TerrainNoiseConfig};
pub use pipeline::{GenerationStage, Pipeline, PipelineError, StageConfig, StageId};
pub use terrain::{CubemapData, Planet};

/// Validates `config` and runs the standard pipeline on a fresh planet.
pub fn generate_planet(config: &TerrainConfig) -> Result<Planet, PipelineError> {
    config.validate()?;
    let mut planet = Planet::new(config.resolution, config.seed);
    Pipeline::from_config(config).run(&mut planet)?;
    Ok(planet)
}
