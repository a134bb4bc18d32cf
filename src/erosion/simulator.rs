//! Fixed-size particle pool stepped against a shared height field.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::ErosionParameters;
use super::particle::{ErosionParticle, update_particle};
use crate::terrain::CubemapData;

/// Running totals of an erosion run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErosionStats {
    /// Particle updates performed.
    pub particle_steps: u64,
    /// Particles reset after evaporating.
    pub respawns: u64,
    /// Sum of positive height changes.
    pub deposited: f64,
    /// Sum of magnitudes of negative height changes.
    pub eroded: f64,
}

impl ErosionStats {
    /// Deposited minus eroded height.
    pub fn net_height_change(&self) -> f64 {
        self.deposited - self.eroded
    }
}

/// Drives a pool of particles over a height field.
///
/// Particles only interact through the grid, and a splat can touch any face,
/// so the pool is advanced sequentially in a fixed order. With a fixed seed
/// runs are reproducible.
#[derive(Debug, Clone)]
pub struct ErosionSimulator {
    params: ErosionParameters,
    particles: Vec<ErosionParticle>,
    rng: ChaCha8Rng,
    stats: ErosionStats,
}

impl ErosionSimulator {
    /// Spawns `particle_count` particles from an RNG seeded with `seed`.
    pub fn new(params: ErosionParameters, particle_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let particles = (0..particle_count)
            .map(|_| ErosionParticle::spawn(&mut rng, &params))
            .collect();
        Self {
            params,
            particles,
            rng,
            stats: ErosionStats::default(),
        }
    }

    pub fn parameters(&self) -> &ErosionParameters {
        &self.params
    }

    pub fn particles(&self) -> &[ErosionParticle] {
        &self.particles
    }

    pub fn stats(&self) -> ErosionStats {
        self.stats
    }

    /// Sediment currently suspended in the pool.
    pub fn suspended_sediment(&self) -> f64 {
        self.particles.iter().map(|p| p.sediment() as f64).sum()
    }

    /// Advances every particle once.
    pub fn step(&mut self, height: &mut CubemapData) {
        for particle in &mut self.particles {
            let step = update_particle(particle, height, &self.params, &mut self.rng);
            self.stats.particle_steps += 1;
            if step.respawned {
                self.stats.respawns += 1;
            }
            if step.height_delta > 0.0 {
                self.stats.deposited += step.height_delta as f64;
            } else {
                self.stats.eroded -= step.height_delta as f64;
            }
        }
    }

    /// Runs `iterations` global steps and returns the cumulative stats.
    pub fn run(&mut self, height: &mut CubemapData, iterations: u32) -> ErosionStats {
        let report_every = (iterations / 10).max(1);
        for iteration in 0..iterations {
            self.step(height);
            if (iteration + 1) % report_every == 0 {
                debug!(
                    iteration = iteration + 1,
                    respawns = self.stats.respawns,
                    deposited = self.stats.deposited,
                    eroded = self.stats.eroded,
                    "erosion progress"
                );
            }
        }
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumpy_field(resolution: u32) -> CubemapData {
        CubemapData::from_fn(resolution, |d| {
            0.5 + 0.03 * (4.0 * d.x).sin() * (3.0 * d.y).cos() + 0.02 * d.z
        })
    }

    #[test]
    fn test_pool_size_is_fixed() {
        let params = ErosionParameters::for_resolution(16);
        let mut height = bumpy_field(16);
        let mut sim = ErosionSimulator::new(params, 25, 7);
        sim.run(&mut height, 40);
        assert_eq!(sim.particles().len(), 25);
        assert_eq!(sim.stats().particle_steps, 25 * 40);
    }

    #[test]
    fn test_erosion_changes_terrain() {
        let params = ErosionParameters::for_resolution(32);
        let mut height = bumpy_field(32);
        let before = height.clone();
        let mut sim = ErosionSimulator::new(params, 50, 1);
        let stats = sim.run(&mut height, 100);

        assert_ne!(height, before, "erosion should modify heights");
        assert!(stats.deposited + stats.eroded > 0.0);
        assert!(height.as_slice().iter().all(|h| h.is_finite()));
    }

    #[test]
    fn test_particles_respawn_over_long_runs() {
        let params = ErosionParameters::for_resolution(16);
        let mut height = bumpy_field(16);
        let mut sim = ErosionSimulator::new(params, 10, 3);
        // dt <= 0.1 and evaporation time 1, so volume drops 1000x within ~70 steps.
        let stats = sim.run(&mut height, 200);
        assert!(stats.respawns >= 10, "respawns {}", stats.respawns);
        for p in sim.particles() {
            assert!(p.volume >= params.respawn_volume());
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let params = ErosionParameters::for_resolution(16);
        let mut a = bumpy_field(16);
        let mut b = a.clone();
        ErosionSimulator::new(params, 20, 99).run(&mut a, 30);
        ErosionSimulator::new(params, 20, 99).run(&mut b, 30);
        assert_eq!(a, b);
    }
}
