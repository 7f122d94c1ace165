//! Hand-off point between meshing and whatever draws or collides with it.

use crate::chunk::ChunkRegion;
use crate::chunk_mesh::ChunkMesh;
use crate::mesher::MeshedChunk;

/// Receives finished chunk meshes.
///
/// Implementations upload to a renderer, build colliders, or just record.
/// Each non-empty chunk is committed exactly once.
pub trait MeshBackend {
    /// Receive the mesh for `region`. `mesh` is never empty.
    fn commit(&mut self, region: &ChunkRegion, mesh: &ChunkMesh);
}

/// Commit every non-empty mesh in order. Returns the number committed.
pub fn commit_all<B: MeshBackend + ?Sized>(backend: &mut B, meshed: &[MeshedChunk]) -> usize {
    let mut committed = 0;
    for MeshedChunk { region, mesh } in meshed {
        if mesh.is_empty() {
            continue;
        }
        backend.commit(region, mesh);
        committed += 1;
    }
    tracing::debug!(committed, "Committed chunk meshes");
    committed
}

/// Summary of one committed mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommittedMesh {
    /// Chunk index from the layout.
    pub chunk: usize,
    /// Vertex count.
    pub vertices: usize,
    /// Index count.
    pub indices: usize,
    /// Quad count.
    pub quads: usize,
}

/// A backend that keeps per-chunk counts, for tools and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    pub committed: Vec<CommittedMesh>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total quads across every committed mesh.
    pub fn total_quads(&self) -> usize {
        self.committed.iter().map(|c| c.quads).sum()
    }

    /// Total vertex buffer size in bytes.
    pub fn total_vertex_bytes(&self) -> usize {
        self.committed
            .iter()
            .map(|c| c.vertices * std::mem::size_of::<crate::MeshVertex>())
            .sum()
    }
}

impl MeshBackend for RecordingBackend {
    fn commit(&mut self, region: &ChunkRegion, mesh: &ChunkMesh) {
        self.committed.push(CommittedMesh {
            chunk: region.index,
            vertices: mesh.vertices.len(),
            indices: mesh.indices.len(),
            quads: mesh.quad_count(),
        });
    }
}
