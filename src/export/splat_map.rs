//! Biome splat map export as 8-bit RGBA PNGs.

use std::path::Path;

use super::{ExportError, TextureExportOptions, write_unorm8_face};
use crate::geometry::CubeFace;
use crate::terrain::{CubemapData, SPLAT_CHANNELS};

/// Export one face of the splat map; R, G, B, A hold tundra, shrub, grass
/// and forest weights.
pub fn export_face_splat_png(
    splat: &CubemapData,
    face: CubeFace,
    path: &Path,
    options: &TextureExportOptions,
) -> Result<(), ExportError> {
    if splat.channels() != SPLAT_CHANNELS {
        return Err(ExportError::ChannelMismatch {
            expected: SPLAT_CHANNELS,
            found: splat.channels(),
        });
    }
    write_unorm8_face(splat, face, path, image::ExtendedColorType::Rgba8, options)
}

/// Export all faces of the splat map as `{base_name}_splat_{face}.png`.
pub fn export_splat_maps(
    splat: &CubemapData,
    output_dir: &Path,
    base_name: &str,
    options: &TextureExportOptions,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir)?;

    for face in CubeFace::ALL {
        let filename = format!("{}_splat_{}.png", base_name, face.short_name());
        export_face_splat_png(splat, face, &output_dir.join(filename), options)?;
    }

    Ok(())
}
