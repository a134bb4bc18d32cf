//! Pipeline module for orchestrating planet generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that can be composed into a complete planet generation pipeline.

mod stage;

pub use stage::{
    BiomeStage, ErosionStage, GenerationStage, HeightmapStage, NormalStage, Pipeline,
    PipelineError, SmoothingStage, StageConfig, StageId,
};
