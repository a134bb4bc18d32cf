//! Cube-sphere geometry module.
//!
//! Provides coordinate systems and transformations for mapping between
//! cube faces and spherical coordinates with minimal distortion.

mod face;
mod spherify;
mod cube_sphere;

pub use face::{CubeFace, FaceFrame};
pub use spherify::{cube_to_sphere, sphere_to_cube, project_to_cube};
pub use cube_sphere::{
    FaceCoord, face_uv_to_cube, point_to_face_coordinates,
    direction_to_face_coordinates, face_uv_to_atlas_uv,
};
