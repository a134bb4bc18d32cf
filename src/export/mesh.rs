//! Binary mesh export for engine import.
//!
//! Layout, all little-endian: `u32` vertex count, `u32` triangle count, the
//! vertex records (14 `f32` each: position, normal, tangent, bitangent, uv)
//! and finally three `u32` indices per triangle.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ExportError;
use crate::mesh::{MeshVertex, SphereMesh};

/// Size in bytes of the header preceding the vertex records.
pub const MESH_HEADER_BYTES: usize = 8;

/// Total file size for a mesh with the given counts.
pub fn mesh_file_size(vertex_count: usize, triangle_count: usize) -> usize {
    MESH_HEADER_BYTES
        + vertex_count * std::mem::size_of::<MeshVertex>()
        + triangle_count * 3 * std::mem::size_of::<u32>()
}

/// Writes `mesh` to `path`.
pub fn export_mesh(mesh: &SphereMesh, path: &Path) -> Result<(), ExportError> {
    let vertex_count =
        u32::try_from(mesh.vertex_count()).map_err(|_| ExportError::MeshTooLarge(mesh.vertex_count()))?;
    let triangle_count = u32::try_from(mesh.triangle_count())
        .map_err(|_| ExportError::MeshTooLarge(mesh.triangle_count()))?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&vertex_count.to_le_bytes())?;
    writer.write_all(&triangle_count.to_le_bytes())?;

    let floats: &[f32] = bytemuck::cast_slice(&mesh.vertices);
    for value in floats {
        writer.write_all(&value.to_le_bytes())?;
    }
    for index in mesh.indices.iter().flatten() {
        writer.write_all(&index.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{UvMode, build_sphere_mesh};
    use tempfile::tempdir;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_export_mesh_layout() {
        let mesh = build_sphere_mesh(3, UvMode::Face);
        let dir = tempdir().unwrap();
        let path = dir.path().join("mesh.bin");
        export_mesh(&mesh, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), mesh_file_size(54, 48));
        assert_eq!(read_u32(&bytes, 0), 54);
        assert_eq!(read_u32(&bytes, 4), 48);

        // First vertex position.
        let x = f32::from_le_bytes(bytes[8..12].try_into().unwrap());
        assert_eq!(x, mesh.vertices[0].position[0]);

        // Last index.
        let last = read_u32(&bytes, bytes.len() - 4);
        assert_eq!(last, mesh.indices[47][2]);
    }
}
