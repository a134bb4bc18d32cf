//! Noise generation module for terrain synthesis.
//!
//! Uses simdnoise for the underlying simplex lookups.

mod fractal;
mod simplex;

pub use fractal::{
    OctaveConfig, TerrainNoiseConfig, fractal_noise, fractal_ridge_noise, ridge_noise,
};
pub use simplex::{Noise3D, SimplexNoise};
