//! Height-field sampling on the sphere: surface points, tangents and normals.
//!
//! Every lookup goes through [`direction_to_face_coordinates`], the exact
//! inverse of the mapping that places grid pixels and mesh vertices, so a
//! direction generated from `(face, u, v)` samples back at that same spot.
//! Normal-map derivation and erosion both use these functions, which keeps
//! their step size and sampling path identical.

use glam::Vec3;

use super::cubemap::CubemapData;
use crate::geometry::{FaceCoord, direction_to_face_coordinates};

/// Radius the stored heights are offset from: a sample with height `h`
/// sits at distance `NOMINAL_RADIUS + h` from the centre.
pub const NOMINAL_RADIUS: f32 = 0.5;

/// Samples channel 0 of `height` in direction `direction`.
///
/// Returns the displaced surface point `direction * (0.5 + h)` and `h`.
pub fn sample_height(direction: Vec3, height: &CubemapData) -> (Vec3, f32) {
    let dir = direction.normalize_or_zero();
    let coord = direction_to_face_coordinates(dir);
    let h = height.bilinear(coord, 0);
    (dir * (NOMINAL_RADIUS + h), h)
}

/// Displaced surface point at a face coordinate.
pub fn surface_point(height: &CubemapData, coord: FaceCoord) -> Vec3 {
    coord.to_sphere_point() * (NOMINAL_RADIUS + height.bilinear(coord, 0))
}

/// Finite-difference surface tangents along face `u` and `v` at `direction`.
///
/// The step is one grid spacing (`1 / resolution`). Near the far edge of a
/// face the forward difference would leave the face, so a backward
/// difference is taken instead; both are divided by the step, so the
/// tangents keep pointing along increasing `u` and `v`.
pub fn surface_tangents(direction: Vec3, height: &CubemapData) -> (Vec3, Vec3) {
    let coord = direction_to_face_coordinates(direction);
    let step = height.grid_spacing();
    let here = surface_point(height, coord);

    let eu = if coord.u + step <= 1.0 {
        (surface_point(height, coord.offset(step, 0.0)) - here) / step
    } else {
        (here - surface_point(height, coord.offset(-step, 0.0))) / step
    };
    let ev = if coord.v + step <= 1.0 {
        (surface_point(height, coord.offset(0.0, step)) - here) / step
    } else {
        (here - surface_point(height, coord.offset(0.0, -step))) / step
    };
    (eu, ev)
}

/// Unit surface normal at `direction`, always pointing away from the centre.
///
/// `cross(eu, ev)` points inward on faces whose u/v frame is left-handed,
/// so the result is flipped whenever it faces the centre.
pub fn surface_normal(direction: Vec3, height: &CubemapData) -> Vec3 {
    let (eu, ev) = surface_tangents(direction, height);
    orient_outward(eu.cross(ev), direction)
}

/// Normalizes `normal` and flips it to the side of `direction`.
fn orient_outward(normal: Vec3, direction: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    if n == Vec3::ZERO {
        return direction.normalize_or_zero();
    }
    if n.dot(direction) < 0.0 { -n } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubeFace;

    #[test]
    fn test_sample_height_on_flat_field() {
        let map = CubemapData::filled(16, 1, 0.5);
        let (point, h) = sample_height(Vec3::new(0.3, -0.8, 0.2), &map);
        assert!((h - 0.5).abs() < 1e-6);
        assert!((point.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sample_height_matches_pixel_at_pixel_centre() {
        let map = CubemapData::from_fn(8, |d| 0.5 + 0.1 * d.x * d.z);
        for face in CubeFace::ALL {
            let dir = map.pixel_direction(face, 3, 6);
            let (_, h) = sample_height(dir, &map);
            assert!(
                (h - map.pixel(face, 3, 6, 0)).abs() < 1e-4,
                "{:?}: {} vs {}",
                face,
                h,
                map.pixel(face, 3, 6, 0)
            );
        }
    }

    #[test]
    fn test_flat_field_normal_is_radial() {
        let map = CubemapData::filled(32, 1, 0.5);
        for face in CubeFace::ALL {
            for &(i, j) in &[(16u32, 16u32), (2, 30), (31, 31), (0, 5)] {
                let dir = map.pixel_direction(face, i, j);
                let n = surface_normal(dir, &map);
                assert!(n.dot(dir) > 0.99, "{:?} ({}, {}): {:?} vs {:?}", face, i, j, n, dir);
            }
        }
    }

    #[test]
    fn test_tangents_follow_face_axes_at_far_edge() {
        let map = CubemapData::filled(16, 1, 0.5);
        for face in CubeFace::ALL {
            let frame = face.frame();
            let dir = map.pixel_direction(face, 15, 15);
            let (eu, ev) = surface_tangents(dir, &map);
            assert!(eu.dot(frame.u_axis) > 0.0, "{:?} eu {:?}", face, eu);
            assert!(ev.dot(frame.v_axis) > 0.0, "{:?} ev {:?}", face, ev);
            assert!(eu.normalize().dot(dir).abs() < 0.1);
        }
    }

    #[test]
    fn test_normal_leans_downhill() {
        // Terrain rises toward +X, so near +Z the normal leans toward -X.
        let map = CubemapData::from_fn(64, |d| 0.5 + 0.2 * d.x);
        let n = surface_normal(Vec3::Z, &map);
        assert!(n.x < -0.05, "normal {:?}", n);
        assert!(n.z > 0.9);
    }
}
