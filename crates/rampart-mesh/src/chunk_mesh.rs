//! Chunk mesh data structure holding vertices and indices produced by meshing.

use glam::Vec2;

use crate::atlas::TextureType;
use crate::face_direction::Face;

/// A single vertex in a chunk mesh.
///
/// `#[repr(C)]` and [`bytemuck::Pod`] so the vertex buffer can be handed to a
/// render backend as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local voxel units.
    pub position: [f32; 3],
    /// Face normal.
    pub normal: [f32; 3],
    /// Atlas texture coordinates.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 32]);

/// Metadata for a single emitted quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadInfo {
    /// Which face this quad belongs to.
    pub face: Face,
    /// Texture chosen for it.
    pub texture: TextureType,
}

/// The mesh output of one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// One entry per emitted quad.
    pub quads: Vec<QuadInfo>,
}

impl ChunkMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one unit face of the voxel at chunk-local `(x, y, z)`.
    ///
    /// Corners run `(u, v)`, `(u+1, v)`, `(u+1, v+1)`, `(u, v+1)` across the
    /// face plane, and the UV rectangle is stretched over them in the same
    /// order. Triangles are counter-clockwise seen from outside the voxel.
    pub fn push_face(
        &mut self,
        face: Face,
        voxel: [u32; 3],
        uv_rect: (Vec2, Vec2),
        texture: TextureType,
    ) {
        let (layer_axis, u_axis, v_axis) = face.axes();
        let normal = face.normal();

        // Positive faces sit on the far side of the voxel.
        let layer_pos = voxel[layer_axis] as f32 + if face.is_negative() { 0.0 } else { 1.0 };
        let u = voxel[u_axis] as f32;
        let v = voxel[v_axis] as f32;

        let (uv_min, uv_max) = uv_rect;
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

        let base = self.vertices.len() as u32;
        for (cu, cv) in corners {
            let mut position = [0.0_f32; 3];
            position[layer_axis] = layer_pos;
            position[u_axis] = u + cu;
            position[v_axis] = v + cv;

            let uv = uv_min + (uv_max - uv_min) * Vec2::new(cu, cv);
            self.vertices.push(MeshVertex {
                position,
                normal,
                uv: uv.to_array(),
            });
        }

        if face.flips_winding() {
            self.indices
                .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        } else {
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        self.quads.push(QuadInfo { face, texture });
    }

    /// Counts the number of quads emitted for a specific face.
    pub fn count_quads_for_face(&self, face: Face) -> usize {
        self.quads.iter().filter(|q| q.face == face).count()
    }

    /// Returns the total number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// The vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect() -> (Vec2, Vec2) {
        (Vec2::ZERO, Vec2::ONE)
    }

    fn triangle_normal(mesh: &ChunkMesh, tri: usize) -> [f32; 3] {
        let p = |i: usize| glam::Vec3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
        let n = (p(1) - p(0)).cross(p(2) - p(0));
        n.normalize().to_array()
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = ChunkMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.len(), 0);
        assert_eq!(mesh.indices.len(), 0);
    }

    #[test]
    fn test_push_single_face() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Face::Top, [0, 0, 0], unit_rect(), TextureType::Grass);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.quad_count(), 1);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 1.0), "Top face sits at y + 1");
    }

    #[test]
    fn test_count_quads_by_face() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Face::Top, [0, 0, 0], unit_rect(), TextureType::Grass);
        mesh.push_face(Face::Top, [1, 0, 0], unit_rect(), TextureType::Grass);
        mesh.push_face(Face::Bottom, [0, 0, 0], unit_rect(), TextureType::Stone);
        assert_eq!(mesh.count_quads_for_face(Face::Top), 2);
        assert_eq!(mesh.count_quads_for_face(Face::Bottom), 1);
        assert_eq!(mesh.count_quads_for_face(Face::Left), 0);
    }

    #[test]
    fn test_triangles_face_outward() {
        for face in Face::ALL {
            let mut mesh = ChunkMesh::new();
            mesh.push_face(face, [2, 2, 2], unit_rect(), TextureType::Dirt);
            for tri in 0..2 {
                let n = triangle_normal(&mesh, tri);
                let dot: f32 = n.iter().zip(face.normal().iter()).map(|(a, b)| a * b).sum();
                assert!((dot - 1.0).abs() < 1e-5, "{face:?} triangle {tri} winds inward");
            }
        }
    }

    #[test]
    fn test_uvs_span_rect() {
        let mut mesh = ChunkMesh::new();
        let rect = (Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.75));
        mesh.push_face(Face::Front, [0, 0, 0], rect, TextureType::Sand);
        let uvs: Vec<[f32; 2]> = mesh.vertices.iter().map(|v| v.uv).collect();
        assert_eq!(uvs, vec![[0.25, 0.5], [0.5, 0.5], [0.5, 0.75], [0.25, 0.75]]);
    }

    #[test]
    fn test_vertex_bytes_length() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Face::Right, [0, 0, 0], unit_rect(), TextureType::Stone);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 32);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
