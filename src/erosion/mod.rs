//! Particle-based hydraulic erosion on the cube-sphere.
//!
//! Water droplets roam the sphere in direction space, so they cross face
//! boundaries freely. Each step reads the local slope from the shared height
//! field and writes the sediment they pick up or drop back into it.

mod config;
mod deposit;
mod particle;
mod simulator;

pub use config::{ErosionConfig, ErosionParameters};
pub use deposit::{deposit, splat_weights};
pub use particle::{ErosionParticle, ParticleStep, random_sphere_point, update_particle};
pub use simulator::{ErosionSimulator, ErosionStats};
