//! Erosion configuration.

use serde::{Deserialize, Serialize};

/// Physical constants of one erosion run.
///
/// All values are positive time constants or gains. Zero time constants are
/// not guarded and produce non-finite heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErosionParameters {
    /// Velocity damping time constant.
    pub friction_time: f32,
    /// Relaxation time of the soil fraction toward equilibrium.
    pub erosion_time: f32,
    /// Evaporation time constant of the particle volume.
    pub evaporation_time: f32,
    /// Volume a particle starts (and respawns) with.
    pub particle_start_volume: f32,
    /// Gain from downhill speed to equilibrium soil fraction.
    pub concentration_factor: f32,
}

impl ErosionParameters {
    /// Default constants with a start volume of `0.8 · spacing²` for a
    /// height field of `resolution` pixels per face edge.
    pub fn for_resolution(resolution: u32) -> Self {
        ErosionConfig::default().parameters(resolution)
    }

    /// Volume below which a particle is respawned.
    pub fn respawn_volume(&self) -> f32 {
        1.0e-3 * self.particle_start_volume
    }

    /// Largest stable timestep independent of particle speed.
    pub(crate) fn max_timestep(&self) -> f32 {
        (0.2 * self.friction_time)
            .min(0.2 * self.erosion_time)
            .min(0.2 * self.evaporation_time)
    }
}

/// User-facing erosion settings; resolved into [`ErosionParameters`] once
/// the height-field resolution is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionConfig {
    /// Run the erosion stage at all.
    pub enabled: bool,
    /// Size of the particle pool.
    pub particles: usize,
    /// Global steps; each step advances every particle once.
    pub iterations: u32,
    pub friction_time: f32,
    pub erosion_time: f32,
    pub evaporation_time: f32,
    pub concentration_factor: f32,
    /// Start volume in units of grid-cell area (`spacing²`).
    pub start_volume_scale: f32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            particles: 1000,
            iterations: 10_000,
            friction_time: 0.5,
            erosion_time: 0.5,
            evaporation_time: 1.0,
            concentration_factor: 3.0,
            start_volume_scale: 0.8,
        }
    }
}

impl ErosionConfig {
    /// Resolves the physical parameters for a height field of `resolution`.
    pub fn parameters(&self, resolution: u32) -> ErosionParameters {
        let spacing = 1.0 / resolution.max(1) as f32;
        ErosionParameters {
            friction_time: self.friction_time,
            erosion_time: self.erosion_time,
            evaporation_time: self.evaporation_time,
            particle_start_volume: self.start_volume_scale * spacing * spacing,
            concentration_factor: self.concentration_factor,
        }
    }
}
