//! Sphere mesh tessellation.
//!
//! Each cube face is split into an `n x n` vertex grid that is pushed through
//! the cube-sphere mapping. Faces are not welded: vertices on shared edges
//! are duplicated per face and coincide up to rounding.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{CubeFace, FaceCoord, face_uv_to_atlas_uv};

/// How vertex texture coordinates are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UvMode {
    /// Face-local `(u, v)`, for sampling a 6-layer texture array per face.
    #[default]
    Face,
    /// Position in the shared 4x3 cross atlas.
    Atlas,
}

/// GPU-ready vertex. Layout: position, normal, tangent, bitangent, uv.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangulated unit sphere built from six face grids.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    /// Number of vertices along each face edge.
    pub divisions: u32,
    pub vertices: Vec<MeshVertex>,
    /// Triangles as vertex index triples, counter-clockwise seen from outside.
    pub indices: Vec<[u32; 3]>,
}

impl SphereMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Raw vertex buffer bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index buffer bytes (three `u32` per triangle).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Expected `(vertices, triangles)` for a mesh with `divisions` per face.
pub fn sphere_mesh_counts(divisions: u32) -> (usize, usize) {
    let n = divisions as usize;
    let cells = n.saturating_sub(1);
    (CubeFace::COUNT * n * n, CubeFace::COUNT * 2 * cells * cells)
}

/// Builds the sphere mesh with `divisions` vertices along each face edge.
///
/// Produces `6·n²` vertices and `12·(n−1)²` triangles. Vertex `(i, j)` of a
/// face has face coordinate `(i/(n−1), j/(n−1))` and index
/// `face·n² + i·n + j`.
///
/// # Panics
/// Panics if `divisions < 2`.
pub fn build_sphere_mesh(divisions: u32, uv_mode: UvMode) -> SphereMesh {
    assert!(divisions >= 2, "sphere mesh needs at least 2 divisions per face");
    let n = divisions;
    let (vertex_count, triangle_count) = sphere_mesh_counts(n);
    let mut vertices = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(triangle_count);
    let last = (n - 1) as f32;

    for face in CubeFace::ALL {
        let base = vertices.len() as u32;
        let frame = face.frame();
        // Left-handed u/v frames would wind clockwise from outside.
        let flip = !face.is_right_handed();

        for i in 0..n {
            for j in 0..n {
                let u = i as f32 / last;
                let v = j as f32 / last;
                let position = FaceCoord::new(face, u, v).to_sphere_point();
                let normal = position.normalize_or_zero();
                let tangent = orthogonalize(frame.u_axis, normal, None);
                let bitangent = orthogonalize(frame.v_axis, normal, Some(tangent));
                let uv = match uv_mode {
                    UvMode::Face => Vec2::new(u, v),
                    UvMode::Atlas => face_uv_to_atlas_uv(face, u, v),
                };

                vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    tangent: tangent.to_array(),
                    bitangent: bitangent.to_array(),
                    uv: uv.to_array(),
                });

                if i != n - 1 && j != n - 1 {
                    let k = base + i * n + j;
                    // k + n steps along u, k + 1 along v.
                    indices.push(emit_triangle(k, k + n, k + 1, flip));
                    indices.push(emit_triangle(k + n, k + n + 1, k + 1, flip));
                }
            }
        }
    }

    SphereMesh {
        divisions: n,
        vertices,
        indices,
    }
}

#[inline]
fn emit_triangle(a: u32, b: u32, c: u32, flip: bool) -> [u32; 3] {
    if flip { [a, c, b] } else { [a, b, c] }
}

/// Gram-Schmidt `axis` against `normal` (and `other`, if given).
fn orthogonalize(axis: Vec3, normal: Vec3, other: Option<Vec3>) -> Vec3 {
    let mut t = axis - axis.dot(normal) * normal;
    if let Some(other) = other {
        t -= t.dot(other) * other;
    }
    t.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: &MeshVertex) -> Vec3 {
        Vec3::from_array(v.position)
    }

    #[test]
    fn test_mesh_counts() {
        for n in [2u32, 3, 5, 16] {
            let mesh = build_sphere_mesh(n, UvMode::Face);
            let n = n as usize;
            assert_eq!(mesh.vertex_count(), 6 * n * n);
            assert_eq!(mesh.triangle_count(), 12 * (n - 1) * (n - 1));
            assert_eq!(sphere_mesh_counts(n as u32), (mesh.vertex_count(), mesh.triangle_count()));
        }
        assert_eq!(build_sphere_mesh(2, UvMode::Atlas).triangle_count(), 12);
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = build_sphere_mesh(9, UvMode::Face);
        for v in &mesh.vertices {
            let len = pos(v).length();
            assert!((len - 1.0).abs() < 1e-4, "vertex {:?} length {}", v.position, len);
            assert!((Vec3::from_array(v.normal) - pos(v)).length() < 1e-4);
        }
    }

    #[test]
    fn test_triangles_wind_outward() {
        let mesh = build_sphere_mesh(6, UvMode::Face);
        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|k| pos(&mesh.vertices[k as usize]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_indices_stay_within_face() {
        let n = 4u32;
        let mesh = build_sphere_mesh(n, UvMode::Face);
        let per_face = (n * n) as usize;
        let tris_per_face = 2 * (n as usize - 1).pow(2);
        for (t, tri) in mesh.indices.iter().enumerate() {
            let face = t / tris_per_face;
            for &k in tri {
                assert_eq!(k as usize / per_face, face);
            }
        }
    }

    #[test]
    fn test_shared_edges_coincide() {
        // +Z at u = 1 is the same edge as +X at u = 0.
        let n = 5u32;
        let mesh = build_sphere_mesh(n, UvMode::Face);
        let at = |face: CubeFace, i: u32, j: u32| {
            pos(&mesh.vertices[(face.index() as u32 * n * n + i * n + j) as usize])
        };
        for j in 0..n {
            let a = at(CubeFace::PosZ, n - 1, j);
            let b = at(CubeFace::PosX, 0, j);
            assert!((a - b).length() < 1e-5, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_tangent_frame_is_orthonormal() {
        let mesh = build_sphere_mesh(5, UvMode::Face);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            let t = Vec3::from_array(v.tangent);
            let b = Vec3::from_array(v.bitangent);
            assert!((t.length() - 1.0).abs() < 1e-4 && (b.length() - 1.0).abs() < 1e-4);
            assert!(t.dot(n).abs() < 1e-4 && b.dot(n).abs() < 1e-4 && t.dot(b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_atlas_uvs_in_unit_square() {
        let mesh = build_sphere_mesh(4, UvMode::Atlas);
        for v in &mesh.vertices {
            assert!(v.uv.iter().all(|&c| (0.0..=1.0).contains(&c)));
        }
        let face_mesh = build_sphere_mesh(4, UvMode::Face);
        assert_eq!(face_mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_buffer_byte_sizes() {
        let mesh = build_sphere_mesh(3, UvMode::Face);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 14 * 4);
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * 56);
        assert_eq!(mesh.index_bytes().len(), mesh.triangle_count() * 12);
    }
}
