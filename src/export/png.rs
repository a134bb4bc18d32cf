//! PNG export functionality for the height map.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};

use super::ExportError;
use crate::geometry::CubeFace;
use crate::terrain::CubemapData;

/// Options for height PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height written as 0.
    pub min_height: f32,
    /// Height written as 65535.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: 0.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options normalizing over the global range of `height`, so all
    /// six faces share one scale.
    ///
    /// A flat map gets a unit-wide range starting at its height.
    pub fn auto_range(height: &CubemapData) -> Self {
        let (min, max) = height.range(0);
        let max = if max > min { max } else { min + 1.0 };
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Exports one face of `height` as a 16-bit grayscale PNG.
///
/// Image column is the pixel column `i`, image row the pixel row `j`.
pub fn export_face_height_png(
    height: &CubemapData,
    face: CubeFace,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let min = options.min_height;
    let max = options.max_height;
    if min >= max {
        return Err(ExportError::InvalidHeightRange(min, max));
    }

    let resolution = height.resolution();
    let range = max - min;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(resolution, resolution);

    for y in 0..resolution {
        for x in 0..resolution {
            let normalized = ((height.pixel(face, x, y, 0) - min) / range).clamp(0.0, 1.0);
            img.put_pixel(x, y, Luma([(normalized * 65535.0) as u16]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(
        byte_slice,
        resolution,
        resolution,
        image::ExtendedColorType::L16,
    )?;

    Ok(())
}

/// Exports all faces of `height` as `{base_name}_height_{face}.png`.
pub fn export_height_maps(
    height: &CubemapData,
    output_dir: &Path,
    base_name: &str,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;

    for face in CubeFace::ALL {
        let filename = format!("{}_height_{}.png", base_name, face.short_name());
        export_face_height_png(height, face, &output_dir.join(filename), options)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_face_height_png() {
        let mut height = CubemapData::new(16, 1);
        for j in 0..16 {
            for i in 0..16 {
                height.set_pixel(CubeFace::PosX, i, j, 0, (i + j) as f32 / 30.0);
            }
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        export_face_height_png(&height, CubeFace::PosX, &path, &PngExportOptions::default())
            .unwrap();

        let img = image::open(&path).unwrap().into_luma16();
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(15, 15)[0], 65535);
        assert!(img.get_pixel(8, 0)[0] < img.get_pixel(15, 0)[0]);
    }

    #[test]
    fn test_export_height_maps_writes_six_files() {
        let height = CubemapData::filled(8, 1, 0.5);
        let dir = tempdir().unwrap();
        let options = PngExportOptions::auto_range(&height);
        export_height_maps(&height, dir.path(), "planet", &options).unwrap();

        for face in CubeFace::ALL {
            let path = dir.path().join(format!("planet_height_{}.png", face.short_name()));
            assert!(path.exists(), "Missing file for {:?}", face);
        }
    }

    #[test]
    fn test_invalid_height_range() {
        let height = CubemapData::new(4, 1);
        let dir = tempdir().unwrap();
        let options = PngExportOptions {
            min_height: 1.0,
            max_height: -1.0,
            ..Default::default()
        };

        let result = export_face_height_png(&height, CubeFace::PosZ, &dir.path().join("t.png"), &options);
        assert!(matches!(result, Err(ExportError::InvalidHeightRange(..))));
    }

    #[test]
    fn test_auto_range_is_global() {
        let mut height = CubemapData::filled(4, 1, 0.5);
        height.set_pixel(CubeFace::NegY, 0, 0, 0, 0.25);
        height.set_pixel(CubeFace::PosZ, 3, 3, 0, 0.75);

        let options = PngExportOptions::auto_range(&height);
        assert_eq!(options.min_height, 0.25);
        assert_eq!(options.max_height, 0.75);
    }
}
