//! Water droplet state and the single-particle integrator.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::config::ErosionParameters;
use super::deposit::deposit;
use crate::geometry::CubeFace;
use crate::terrain::{CubemapData, surface_normal};

/// A water droplet roaming the sphere surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErosionParticle {
    /// Unit sphere direction.
    pub position: Vec3,
    /// Velocity, kept tangent to the sphere.
    pub velocity: Vec3,
    /// Remaining water volume.
    pub volume: f32,
    /// Sediment concentration in [0, 1].
    pub soil_fraction: f32,
}

/// What one integration step did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticleStep {
    /// Height added to the grid (negative when soil was picked up).
    pub height_delta: f32,
    /// The particle evaporated and was reset to a fresh spawn.
    pub respawned: bool,
}

impl ErosionParticle {
    /// A fresh particle at a uniformly random point on the sphere.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, params: &ErosionParameters) -> Self {
        let mut particle = Self {
            position: Vec3::Y,
            velocity: Vec3::ZERO,
            volume: 0.0,
            soil_fraction: 0.0,
        };
        particle.reset(rng, params);
        particle
    }

    /// Reinitializes in place: new random position, zero velocity, start
    /// volume and no sediment.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &ErosionParameters) {
        self.position = random_sphere_point(rng);
        self.velocity = Vec3::ZERO;
        self.volume = params.particle_start_volume;
        self.soil_fraction = 0.0;
    }

    /// Sediment carried, `volume · soil_fraction`.
    pub fn sediment(&self) -> f32 {
        self.volume * self.soil_fraction
    }
}

/// Uniform random direction on the unit sphere.
pub fn random_sphere_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    let theta = 2.0 * PI * u;
    let z = 2.0 * v - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Relaxation rate of the sediment fraction toward `equilibrium`, floored so
/// one step of `dt` can at most empty the particle.
pub(crate) fn soil_fraction_rate(fraction: f32, equilibrium: f32, erosion_time: f32, dt: f32) -> f32 {
    ((equilibrium - fraction) / erosion_time).max(-fraction / dt)
}

/// Advances `particle` by one adaptive timestep against `height`.
///
/// Gravity is the surface normal's component tangent to the sphere, so it
/// points downhill. The sediment change over the step is turned into a height
/// change and splatted ahead of the particle. Deposits are capped at half the
/// slope-implied rise over one grid cell. The particle respawns once its
/// volume falls below [`ErosionParameters::respawn_volume`].
pub fn update_particle<R: Rng + ?Sized>(
    particle: &mut ErosionParticle,
    height: &mut CubemapData,
    params: &ErosionParameters,
    rng: &mut R,
) -> ParticleStep {
    let sphere_normal = particle.position.normalize_or_zero();
    let normal = surface_normal(particle.position, height);
    let gravity = normal - normal.dot(sphere_normal) * sphere_normal;

    let spacing = height.grid_spacing();
    let speed = particle.velocity.length();
    let soil_eq = (particle.velocity.dot(gravity) * params.concentration_factor).clamp(0.0, 1.0);

    let dt = params.max_timestep().min(spacing / (speed + 1.0e-8));

    let d_velocity = gravity - particle.velocity / params.friction_time;
    let d_volume = -particle.volume / params.evaporation_time;
    let d_fraction = soil_fraction_rate(particle.soil_fraction, soil_eq, params.erosion_time, dt);

    let delta_volume = dt * d_volume;
    let delta_fraction = dt * d_fraction;
    let sediment_change = particle.soil_fraction * delta_volume + particle.volume * delta_fraction;

    particle.velocity += dt * d_velocity;
    particle.position += dt * particle.velocity;
    particle.volume += delta_volume;
    particle.soil_fraction = (particle.soil_fraction + delta_fraction).clamp(0.0, 1.0);

    // Back onto the sphere, velocity tangent to it.
    particle.position = particle.position.normalize_or_zero();
    particle.velocity -= particle.velocity.dot(particle.position) * particle.position;

    let mut height_delta = -sediment_change / (spacing * spacing);
    height_delta = height_delta.min(0.5 * gravity.length() * spacing);

    if height_delta != 0.0 {
        let frame = CubeFace::from_direction(particle.position).frame();
        let flow = Vec2::new(
            particle.velocity.dot(frame.u_axis),
            particle.velocity.dot(frame.v_axis),
        );
        deposit(height, particle.position, flow, height_delta);
    }

    let respawned = particle.volume < params.respawn_volume();
    if respawned {
        particle.reset(rng, params);
    }

    ParticleStep {
        height_delta,
        respawned,
    }
}
