//! Normal map export as 8-bit RGB PNGs.

use std::path::Path;

use image::codecs::png::{CompressionType, FilterType};

use super::{ExportError, write_unorm8_face};
use crate::geometry::CubeFace;
use crate::terrain::{CubemapData, NORMAL_CHANNELS};

/// Options for normal and splat map export.
#[derive(Debug, Clone)]
pub struct TextureExportOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for TextureExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Export one face of an encoded normal map as an RGB PNG.
///
/// The map already holds `(n + 1) / 2` per channel, so values are only
/// quantized.
pub fn export_face_normal_png(
    normal: &CubemapData,
    face: CubeFace,
    path: &Path,
    options: &TextureExportOptions,
) -> Result<(), ExportError> {
    if normal.channels() != NORMAL_CHANNELS {
        return Err(ExportError::ChannelMismatch {
            expected: NORMAL_CHANNELS,
            found: normal.channels(),
        });
    }
    write_unorm8_face(normal, face, path, image::ExtendedColorType::Rgb8, options)
}

/// Export all faces of a normal map.
///
/// Files are named: `{base_name}_normal_{face}.png`.
pub fn export_normal_maps(
    normal: &CubemapData,
    output_dir: &Path,
    base_name: &str,
    options: &TextureExportOptions,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;
    for face in CubeFace::ALL {
        let filename = format!("{}_normal_{}.png", base_name, face.short_name());
        export_face_normal_png(normal, face, &output_dir.join(filename), options)?;
    }
    Ok(())
}
