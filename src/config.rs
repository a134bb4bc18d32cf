//! Top-level generation settings and their TOML file form.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeConfig;
use crate::erosion::ErosionConfig;
use crate::mesh::UvMode;
use crate::noise::TerrainNoiseConfig;

/// Errors from loading, saving or validating a [`TerrainConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to generate one planet.
///
/// Missing TOML keys fall back to [`Default`], so a file only lists what it
/// changes:
///
/// ```toml
/// seed = 7
/// resolution = 256
///
/// [erosion]
/// particles = 200
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Master random seed.
    pub seed: u64,
    /// Pixels per cubemap face edge.
    pub resolution: u32,
    /// Vertices per sphere-mesh face edge.
    pub mesh_divisions: u32,
    /// Texture coordinates emitted on mesh vertices.
    pub uv_mode: UvMode,
    /// Box-filter passes applied after erosion.
    pub smoothing_passes: u32,
    pub noise: TerrainNoiseConfig,
    pub erosion: ErosionConfig,
    pub biomes: BiomeConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            resolution: 512,
            mesh_divisions: 64,
            uv_mode: UvMode::Face,
            smoothing_passes: 1,
            noise: TerrainNoiseConfig::default(),
            erosion: ErosionConfig::default(),
            biomes: BiomeConfig::default(),
        }
    }
}

impl TerrainConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TerrainConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Writes this config as pretty TOML.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rejects sizes the generators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        if self.mesh_divisions < 2 {
            return Err(ConfigError::Invalid(format!(
                "mesh_divisions must be at least 2, got {}",
                self.mesh_divisions
            )));
        }
        let e = &self.erosion;
        if e.enabled && !(e.friction_time > 0.0 && e.erosion_time > 0.0 && e.evaporation_time > 0.0) {
            return Err(ConfigError::Invalid(
                "erosion time constants must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
