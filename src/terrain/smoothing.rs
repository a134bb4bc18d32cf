//! Box-filter smoothing of cubemap interiors.

use rayon::prelude::*;

use super::cubemap::{CubemapData, FaceViewMut};

/// Runs `passes` 4-neighbour averaging passes over every face in parallel.
///
/// Only interior pixels are rewritten; the outermost row and column of each
/// face keep their values.
pub fn smooth_map(map: &mut CubemapData, passes: u32) {
    if passes == 0 || map.resolution() < 3 {
        return;
    }
    map.par_faces_mut().for_each(|mut face| {
        for _ in 0..passes {
            smooth_face(&mut face);
        }
    });
}

/// One in-place pass over a face, rows then columns, every channel.
///
/// Updated values feed later pixels in the same pass.
pub fn smooth_face(face: &mut FaceViewMut<'_>) {
    let res = face.resolution();
    if res < 3 {
        return;
    }
    for j in 1..res - 1 {
        for i in 1..res - 1 {
            for c in 0..face.channels() {
                let average = 0.25
                    * (face.get(i + 1, j, c)
                        + face.get(i - 1, j, c)
                        + face.get(i, j + 1, c)
                        + face.get(i, j - 1, c));
                face.set(i, j, c, average);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubeFace;

    #[test]
    fn test_constant_field_is_unchanged() {
        let mut map = CubemapData::filled(8, 1, 0.42);
        smooth_map(&mut map, 3);
        assert!(map.as_slice().iter().all(|&v| (v - 0.42).abs() < 1e-6));
    }

    #[test]
    fn test_spike_is_spread_and_border_untouched() {
        let mut map = CubemapData::new(5, 1);
        map.set_pixel(CubeFace::PosX, 2, 2, 0, 1.0);
        map.set_pixel(CubeFace::PosX, 0, 2, 0, 3.0);
        smooth_map(&mut map, 1);

        assert!(map.pixel(CubeFace::PosX, 2, 2, 0) < 1.0);
        assert!(map.pixel(CubeFace::PosX, 2, 1, 0) > 0.0);
        assert_eq!(map.pixel(CubeFace::PosX, 0, 2, 0), 3.0);
        // Pixel (1,2) averages the border value 3.0 it touches.
        assert!(map.pixel(CubeFace::PosX, 1, 2, 0) > 0.0);
        // Other faces never see the spike.
        assert!(map.face_slice(CubeFace::NegX).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_passes_is_noop() {
        let mut map = CubemapData::new(4, 2);
        map.set_pixel(CubeFace::PosY, 1, 1, 1, 5.0);
        let before = map.clone();
        smooth_map(&mut map, 0);
        assert_eq!(map, before);
    }

    #[test]
    fn test_smoothing_reduces_interior_variance() {
        let mut map = CubemapData::new(16, 1);
        for j in 0..16 {
            for i in 0..16 {
                let value = if (i + j) % 2 == 0 { 1.0 } else { 0.0 };
                map.set_pixel(CubeFace::PosZ, i, j, 0, value);
            }
        }
        let variance = |m: &CubemapData| {
            let mut values = Vec::new();
            for j in 1..15 {
                for i in 1..15 {
                    values.push(m.pixel(CubeFace::PosZ, i, j, 0));
                }
            }
            let mean = values.iter().sum::<f32>() / values.len() as f32;
            values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
        };
        let before = variance(&map);
        smooth_map(&mut map, 2);
        assert!(variance(&map) < before);
    }
}
