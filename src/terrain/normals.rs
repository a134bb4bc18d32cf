//! Normal-map derivation from the current height field.

use glam::Vec3;
use rayon::prelude::*;

use super::cubemap::CubemapData;
use super::surface::surface_normal;

/// Writes the outward surface normal of every pixel into the 3-channel
/// `normals` map, remapped from [-1, 1] to [0, 1].
///
/// Heights are looked up by direction, so `normals` need not share the
/// height map's resolution.
pub fn calculate_normal_map(height: &CubemapData, normals: &mut CubemapData) {
    debug_assert!(normals.channels() >= 3, "normal map needs 3 channels");
    normals.par_faces_mut().for_each(|mut face| {
        let resolution = face.resolution();
        for j in 0..resolution {
            for i in 0..resolution {
                let direction = face.pixel_direction(i, j);
                let encoded = encode_normal(surface_normal(direction, height));
                for (c, value) in encoded.to_array().into_iter().enumerate() {
                    face.set(i, j, c, value);
                }
            }
        }
    });
}

/// Maps a unit normal into [0, 1] per component.
#[inline]
pub fn encode_normal(n: Vec3) -> Vec3 {
    (n + Vec3::ONE) * 0.5
}

/// Inverse of [`encode_normal`].
#[inline]
pub fn decode_normal(encoded: Vec3) -> Vec3 {
    encoded * 2.0 - Vec3::ONE
}
