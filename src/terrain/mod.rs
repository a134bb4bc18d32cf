//! Terrain generation module.
//!
//! Provides the cubemap grid storage, height-field sampling on the sphere,
//! and the per-face passes that build the planet's output maps.

mod cubemap;
mod heightmap;
mod normals;
mod planet;
mod smoothing;
mod surface;

pub use cubemap::{CubemapData, FaceViewMut};
pub use heightmap::{generate_face_heightmap, generate_heightmap};
pub use normals::{calculate_normal_map, decode_normal, encode_normal};
pub use planet::{HEIGHT_CHANNELS, NORMAL_CHANNELS, Planet, SPLAT_CHANNELS};
pub use smoothing::{smooth_face, smooth_map};
pub use surface::{
    NOMINAL_RADIUS, sample_height, surface_normal, surface_point, surface_tangents,
};
