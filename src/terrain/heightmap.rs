//! Heightmap generation from the blended ridge/smooth noise field.

use rayon::prelude::*;

use super::cubemap::{CubemapData, FaceViewMut};
use crate::noise::{Noise3D, TerrainNoiseConfig};

/// Fills channel 0 of `height` with noise heights for all six faces.
///
/// Faces run as independent rayon tasks over disjoint views; noise is a
/// function of sphere direction only, so faces agree along shared edges.
pub fn generate_heightmap<N: Noise3D>(
    height: &mut CubemapData,
    noise: &N,
    config: &TerrainNoiseConfig,
) {
    height.par_faces_mut().for_each(|mut face| {
        generate_face_heightmap(&mut face, noise, config);
    });
}

/// Generates heights for a single cube face.
pub fn generate_face_heightmap<N: Noise3D>(
    face: &mut FaceViewMut<'_>,
    noise: &N,
    config: &TerrainNoiseConfig,
) {
    let resolution = face.resolution();
    for j in 0..resolution {
        for i in 0..resolution {
            let direction = face.pixel_direction(i, j);
            face.set(i, j, 0, config.height_at(noise, direction));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubeFace;
    use crate::noise::SimplexNoise;

    #[test]
    fn test_generate_heightmap() {
        let mut height = CubemapData::new(32, 1);
        let noise = SimplexNoise::new(42);
        generate_heightmap(&mut height, &noise, &TerrainNoiseConfig::default());

        let (min, max) = height.range(0);
        assert!(max - min > 0.05, "Heightmap should have relief: ({}, {})", min, max);
        // |ridge| <= 1.875 and |smooth| <= 0.05 * 2.533, scaled by 0.1.
        assert!(min >= 0.5 - 0.2 && max <= 0.5 + 0.2, "range ({}, {})", min, max);
    }

    #[test]
    fn test_heights_are_a_function_of_direction() {
        let mut height = CubemapData::new(16, 1);
        let noise = SimplexNoise::new(7);
        let config = TerrainNoiseConfig::default();
        generate_heightmap(&mut height, &noise, &config);

        for face in CubeFace::ALL {
            let dir = height.pixel_direction(face, 5, 11);
            assert_eq!(height.pixel(face, 5, 11, 0), config.height_at(&noise, dir));
        }
    }

    #[test]
    fn test_heightmap_reproducibility() {
        let noise = SimplexNoise::new(999);
        let config = TerrainNoiseConfig::default();

        let mut a = CubemapData::new(16, 1);
        let mut b = CubemapData::new(16, 1);
        generate_heightmap(&mut a, &noise, &config);
        generate_heightmap(&mut b, &noise, &config);

        assert_eq!(a, b, "Same seed should produce identical heights");
    }

    #[test]
    fn test_flat_config_gives_nominal_height() {
        let mut height = CubemapData::new(8, 1);
        generate_heightmap(&mut height, &SimplexNoise::new(1), &TerrainNoiseConfig::flat());
        assert_eq!(height.range(0), (0.5, 0.5));
    }
}
