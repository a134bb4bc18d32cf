//! Export module for saving planet maps and the sphere mesh to disk.
//!
//! Heights go to 16-bit grayscale PNG, normals to RGB8, biome weights to
//! RGBA8 (one file per cube face), and the mesh to a flat binary file.

mod mesh;
mod normal_map;
mod png;
mod splat_map;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use thiserror::Error;
use tracing::info;

use crate::geometry::CubeFace;
use crate::mesh::SphereMesh;
use crate::terrain::{CubemapData, Planet};

pub use mesh::{MESH_HEADER_BYTES, export_mesh, mesh_file_size};
pub use normal_map::{TextureExportOptions, export_face_normal_png, export_normal_maps};
pub use png::{PngExportOptions, export_face_height_png, export_height_maps};
pub use splat_map::{export_face_splat_png, export_splat_maps};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
    #[error("Map has {found} channels, expected {expected}")]
    ChannelMismatch { expected: usize, found: usize },
    #[error("Mesh too large for a u32 count: {0}")]
    MeshTooLarge(usize),
}

/// Writes every map of `planet` and `mesh` into `output_dir`, returning the
/// mesh file path.
pub fn export_planet(
    planet: &Planet,
    mesh: &SphereMesh,
    output_dir: &Path,
    base_name: &str,
) -> Result<PathBuf, ExportError> {
    let textures = TextureExportOptions::default();
    export_height_maps(
        &planet.height,
        output_dir,
        base_name,
        &PngExportOptions::auto_range(&planet.height),
    )?;
    export_normal_maps(&planet.normal, output_dir, base_name, &textures)?;
    export_splat_maps(&planet.splat, output_dir, base_name, &textures)?;

    let mesh_path = output_dir.join(format!("{}_mesh.bin", base_name));
    export_mesh(mesh, &mesh_path)?;

    info!(dir = %output_dir.display(), "exported {} maps and mesh", base_name);
    Ok(mesh_path)
}

/// Quantizes one face of a [0, 1] map to 8 bits per channel and writes it.
fn write_unorm8_face(
    map: &CubemapData,
    face: CubeFace,
    path: &Path,
    color: image::ExtendedColorType,
    options: &TextureExportOptions,
) -> Result<(), ExportError> {
    let resolution = map.resolution();
    let bytes: Vec<u8> = map
        .face_slice(face)
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(&bytes, resolution, resolution, color)?;
    Ok(())
}
