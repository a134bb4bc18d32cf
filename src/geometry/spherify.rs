//! Spherification algorithm for cube-to-sphere mapping and its inverse.
//!
//! Uses the analytical spherification formula that provides better uniformity
//! than simple normalization, reducing area distortion at cube corners.

use glam::Vec3;

use super::face::CubeFace;

/// Transforms a point on the unit cube surface to the unit sphere.
///
/// # Arguments
/// * `cube_pos` - A point on the surface of a unit cube (coordinates in [-1, 1])
///
/// # Returns
/// A point on the unit sphere (length = 1.0 up to rounding)
///
/// # Example
/// ```
/// use glam::Vec3;
/// use spheregen::geometry::cube_to_sphere;
///
/// let sphere_point = cube_to_sphere(Vec3::new(1.0, 0.5, 0.5));
/// assert!((sphere_point.length() - 1.0).abs() < 1e-6);
/// ```
pub fn cube_to_sphere(cube_pos: Vec3) -> Vec3 {
    let x2 = cube_pos.x * cube_pos.x;
    let y2 = cube_pos.y * cube_pos.y;
    let z2 = cube_pos.z * cube_pos.z;

    Vec3::new(
        cube_pos.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).max(0.0).sqrt(),
    )
}

/// Projects a direction onto the cube surface by dividing by its largest
/// absolute component (gnomonic projection).
///
/// This is the inverse of plain normalization, not of [`cube_to_sphere`].
pub fn project_to_cube(direction: Vec3) -> Vec3 {
    let max = direction.abs().max_element();
    if max <= 0.0 {
        return CubeFace::PosX.normal();
    }
    direction / max
}

/// Exact inverse of [`cube_to_sphere`]: returns the cube surface point whose
/// spherified image is `direction` (normalized first).
pub fn sphere_to_cube(direction: Vec3) -> Vec3 {
    let (face, s, t) = unwarp(direction);
    let frame = face.frame();
    frame.normal + s * frame.u_axis + t * frame.v_axis
}

/// Recovers the face and the signed in-face cube coordinates `s, t` in
/// [-1, 1] of a sphere direction.
///
/// In a face's own frame the spherified point is
/// `(sqrt(1 - s²/2 - t²/2 + s²t²/3), s·sqrt(1/2 - t²/6), t·sqrt(1/2 - s²/6))`;
/// squaring the two tangential components gives a quadratic in `t²` (and
/// symmetrically `s²`) whose smaller root is the in-range solution.
pub(crate) fn unwarp(direction: Vec3) -> (CubeFace, f32, f32) {
    let face = CubeFace::from_direction(direction);
    let p = direction.normalize_or_zero();
    let frame = face.frame();

    let big_s = p.dot(frame.u_axis);
    let big_t = p.dot(frame.v_axis);
    let s2 = big_s * big_s;
    let t2 = big_t * big_t;

    let s = big_s.signum() * smaller_root(t2 - s2, s2).sqrt();
    let t = big_t.signum() * smaller_root(s2 - t2, t2).sqrt();

    (face, s.clamp(-1.0, 1.0), t.clamp(-1.0, 1.0))
}

/// Smaller root of `x² + (2·d - 3)·x + 6·c = 0`, written in the
/// cancellation-free form `12c / (-q + sqrt(q² - 24c))`.
fn smaller_root(d: f32, c: f32) -> f32 {
    let q = 2.0 * d - 3.0;
    let disc = (q * q - 24.0 * c).max(0.0);
    (12.0 * c / (-q + disc.sqrt())).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spherify_preserves_unit_length() {
        // Points ON the cube surface (one coordinate must be ±1)
        let test_points = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.5, 0.5),
            Vec3::new(-1.0, 0.3, -0.7),
            Vec3::new(0.5, 1.0, -0.2),
            Vec3::new(0.8, 0.8, 1.0),
            Vec3::new(-1.0, -0.5, 0.5),
            Vec3::new(0.3, -1.0, 0.7),
        ];

        for p in test_points {
            let len = cube_to_sphere(p).length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "Point {:?} spherified to length {} (expected 1.0)",
                p,
                len
            );
        }
    }

    #[test]
    fn test_spherify_cube_corners() {
        let corners = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
        ];

        for corner in corners {
            let len = cube_to_sphere(corner).length();
            assert!((len - 1.0).abs() < 1e-5, "Corner {:?} length {}", corner, len);
        }
    }

    #[test]
    fn test_spherify_face_centers_unchanged() {
        for face in CubeFace::ALL {
            let center = face.normal();
            assert!((cube_to_sphere(center) - center).length() < 1e-6);
        }
    }

    #[test]
    fn test_project_to_cube_hits_surface() {
        let dirs = [
            Vec3::new(0.3, -0.9, 0.2),
            Vec3::new(-2.0, 0.5, 1.0),
            Vec3::new(0.1, 0.1, -0.4),
        ];
        for d in dirs {
            let c = project_to_cube(d);
            assert!((c.abs().max_element() - 1.0).abs() < 1e-6);
            assert!((c.normalize() - d.normalize()).length() < 1e-6);
        }
    }

    #[test]
    fn test_sphere_to_cube_inverts_spherify() {
        for face in CubeFace::ALL {
            let frame = face.frame();
            for &s in &[-1.0f32, -0.75, -0.3, 0.0, 0.2, 0.6, 0.95, 1.0] {
                for &t in &[-1.0f32, -0.5, 0.0, 0.4, 0.9, 1.0] {
                    let cube = frame.normal + s * frame.u_axis + t * frame.v_axis;
                    let back = sphere_to_cube(cube_to_sphere(cube));
                    assert!(
                        (back - cube).length() < 1e-4,
                        "{:?} ({}, {}): {:?} vs {:?}",
                        face,
                        s,
                        t,
                        back,
                        cube
                    );
                }
            }
        }
    }

    #[test]
    fn test_sphere_to_cube_ignores_direction_length() {
        let d = Vec3::new(0.2, 0.7, -0.4);
        let a = sphere_to_cube(d);
        let b = sphere_to_cube(d * 10.0);
        assert!((a - b).length() < 1e-5);
    }
}
