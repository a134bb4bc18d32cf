//! Coordinate conversion utilities for cube-sphere mapping.

use glam::{Vec2, Vec3};

use super::face::CubeFace;
use super::spherify::{cube_to_sphere, project_to_cube, unwarp};

/// A 2D coordinate within a cube face, with UV in [0, 1] range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoord {
    /// The cube face this coordinate belongs to.
    pub face: CubeFace,
    /// U coordinate in [0, 1] range.
    pub u: f32,
    /// V coordinate in [0, 1] range.
    pub v: f32,
}

impl FaceCoord {
    /// Creates a new face coordinate, clamping `u` and `v` into [0, 1].
    pub fn new(face: CubeFace, u: f32, v: f32) -> Self {
        Self {
            face,
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Point on the unit cube surface for this coordinate.
    pub fn to_cube_point(self) -> Vec3 {
        face_uv_to_cube(self.face, self.u, self.v)
    }

    /// Converts this face coordinate to a point on the unit sphere.
    pub fn to_sphere_point(self) -> Vec3 {
        cube_to_sphere(self.to_cube_point())
    }

    /// Same face, shifted by `(du, dv)` and clamped back onto the face.
    pub fn offset(self, du: f32, dv: f32) -> Self {
        Self::new(self.face, self.u + du, self.v + dv)
    }
}

/// Converts UV coordinates on a face to a 3D point on the unit cube surface.
///
/// UV coordinates are in [0, 1] range and map to [-1, 1] on the cube face.
/// The fixed axis is `±1`; the other two follow the face's `u_axis`/`v_axis`.
pub fn face_uv_to_cube(face: CubeFace, u: f32, v: f32) -> Vec3 {
    let s = u * 2.0 - 1.0;
    let t = v * 2.0 - 1.0;
    let frame = face.frame();
    frame.normal + s * frame.u_axis + t * frame.v_axis
}

/// Gnomonic inverse of [`face_uv_to_cube`]: picks the dominant-axis face,
/// scales `point` onto the cube surface and reads off `u, v`.
///
/// `face_uv_to_cube(point_to_face_coordinates(d))` is parallel to `d`.
pub fn point_to_face_coordinates(point: Vec3) -> FaceCoord {
    let face = CubeFace::from_direction(point);
    let cube = project_to_cube(point);
    let frame = face.frame();

    let s = cube.dot(frame.u_axis);
    let t = cube.dot(frame.v_axis);

    FaceCoord::new(face, (s + 1.0) * 0.5, (t + 1.0) * 0.5)
}

/// Exact inverse of [`FaceCoord::to_sphere_point`].
///
/// This is the lookup used for all height-field sampling, so that a sphere
/// direction produced from grid pixel or mesh vertex `(face, u, v)` samples
/// back at the same `(face, u, v)`.
pub fn direction_to_face_coordinates(direction: Vec3) -> FaceCoord {
    let (face, s, t) = unwarp(direction);
    FaceCoord::new(face, (s + 1.0) * 0.5, (t + 1.0) * 0.5)
}

/// Maps face-local UV into the shared 4x3 unfolded-cross texture atlas.
pub fn face_uv_to_atlas_uv(face: CubeFace, u: f32, v: f32) -> Vec2 {
    let (col, row) = face.atlas_tile();
    let au = (col + u.clamp(0.0, 1.0)) / 4.0;
    let av = (row + v.clamp(0.0, 1.0)) / 3.0;
    Vec2::new(au.clamp(0.0, 1.0), av.clamp(0.0, 1.0))
}
