//! Generation stage trait and pipeline orchestration.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::biomes::{BiomeConfig, generate_biomes};
use crate::config::{ConfigError, TerrainConfig};
use crate::erosion::{ErosionConfig, ErosionSimulator};
use crate::noise::{SimplexNoise, TerrainNoiseConfig};
use crate::terrain::{
    NORMAL_CHANNELS, Planet, SPLAT_CHANNELS, calculate_normal_map, generate_heightmap, smooth_map,
};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Noise synthesis of the height map.
    Heightmap,
    /// Particle hydraulic erosion.
    Erosion,
    /// Box-filter smoothing of the height map.
    Smoothing,
    /// Normal-map derivation.
    Normals,
    /// Biome splat-map classification.
    Biomes,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Heightmap => "heightmap",
            StageId::Erosion => "erosion",
            StageId::Smoothing => "smoothing",
            StageId::Normals => "normals",
            StageId::Biomes => "biomes",
        }
    }
}

/// Configuration shared by every stage of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct StageConfig {
    /// Height-field noise parameters.
    pub noise: TerrainNoiseConfig,
}

impl StageConfig {
    /// Creates a new configuration with the given noise settings.
    pub fn with_noise(noise: TerrainNoiseConfig) -> Self {
        Self { noise }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the planet data in some way, building upon
/// previous stages.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the planet in place.
    fn execute(&self, planet: &mut Planet, config: &StageConfig) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
///
/// Stages run strictly one after another; per-face work inside a stage is
/// parallel and joins before the next stage starts.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: StageConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: StageConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// The standard sequence for `config`: heightmap, erosion (if enabled),
    /// smoothing (if any passes), normals, biomes.
    pub fn from_config(config: &TerrainConfig) -> Self {
        let mut pipeline = Self::new(StageConfig::with_noise(config.noise.clone()));
        pipeline.add_stage(HeightmapStage);
        if config.erosion.enabled && config.erosion.particles > 0 && config.erosion.iterations > 0 {
            pipeline.add_stage(ErosionStage::new(config.erosion.clone()));
        }
        if config.smoothing_passes > 0 {
            pipeline.add_stage(SmoothingStage::new(config.smoothing_passes));
        }
        pipeline.add_stage(NormalStage);
        pipeline.add_stage(BiomeStage::new(config.biomes.clone()));
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Identifiers of the stages, in execution order.
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Executes all stages in order on the given planet.
    pub fn run(&self, planet: &mut Planet) -> Result<(), PipelineError> {
        self.run_with_callbacks(planet, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `planet` - The planet to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        planet: &mut Planet,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            let span = info_span!("stage", name = stage.id().name());
            let _guard = span.enter();
            let start = Instant::now();
            stage.execute(planet, &self.config)?;
            info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "{} complete",
                stage.name()
            );
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Heightmap generation stage using the blended ridge/smooth noise.
pub struct HeightmapStage;

impl GenerationStage for HeightmapStage {
    fn id(&self) -> StageId {
        StageId::Heightmap
    }

    fn name(&self) -> &str {
        "Heightmap Generation"
    }

    fn execute(&self, planet: &mut Planet, config: &StageConfig) -> Result<(), PipelineError> {
        let noise = SimplexNoise::from_seed(planet.seed);
        generate_heightmap(&mut planet.height, &noise, &config.noise);
        let (min, max) = planet.height_range();
        debug!(min, max, "height range");
        Ok(())
    }
}

/// Particle hydraulic erosion stage.
pub struct ErosionStage {
    pub config: ErosionConfig,
}

impl ErosionStage {
    pub fn new(config: ErosionConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for ErosionStage {
    fn id(&self) -> StageId {
        StageId::Erosion
    }

    fn name(&self) -> &str {
        "Hydraulic Erosion"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(&self, planet: &mut Planet, _config: &StageConfig) -> Result<(), PipelineError> {
        let params = self.config.parameters(planet.resolution());
        let mut simulator = ErosionSimulator::new(params, self.config.particles, planet.seed);
        let stats = simulator.run(&mut planet.height, self.config.iterations);
        debug!(
            particle_steps = stats.particle_steps,
            respawns = stats.respawns,
            deposited = stats.deposited,
            eroded = stats.eroded,
            "erosion finished"
        );
        Ok(())
    }
}

/// Interior box-filter smoothing of the height map.
pub struct SmoothingStage {
    pub passes: u32,
}

impl SmoothingStage {
    pub fn new(passes: u32) -> Self {
        Self { passes }
    }
}

impl GenerationStage for SmoothingStage {
    fn id(&self) -> StageId {
        StageId::Smoothing
    }

    fn name(&self) -> &str {
        "Smoothing"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(&self, planet: &mut Planet, _config: &StageConfig) -> Result<(), PipelineError> {
        smooth_map(&mut planet.height, self.passes);
        Ok(())
    }
}

/// Normal-map derivation from the current heights.
pub struct NormalStage;

impl GenerationStage for NormalStage {
    fn id(&self) -> StageId {
        StageId::Normals
    }

    fn name(&self) -> &str {
        "Normal Map"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(&self, planet: &mut Planet, _config: &StageConfig) -> Result<(), PipelineError> {
        if planet.normal.channels() != NORMAL_CHANNELS {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                format!(
                    "normal map has {} channels, expected {}",
                    planet.normal.channels(),
                    NORMAL_CHANNELS
                ),
            ));
        }
        calculate_normal_map(&planet.height, &mut planet.normal);
        Ok(())
    }
}

/// Biome classification into the splat map.
pub struct BiomeStage {
    pub config: BiomeConfig,
}

impl BiomeStage {
    pub fn new(config: BiomeConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biomes
    }

    fn name(&self) -> &str {
        "Biome Classification"
    }

    fn execute(&self, planet: &mut Planet, _config: &StageConfig) -> Result<(), PipelineError> {
        if planet.splat.channels() != SPLAT_CHANNELS {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                format!(
                    "splat map has {} channels, expected {}",
                    planet.splat.channels(),
                    SPLAT_CHANNELS
                ),
            ));
        }
        let noise = SimplexNoise::from_seed(planet.seed);
        generate_biomes(&mut planet.splat, &noise, &self.config);
        Ok(())
    }
}
