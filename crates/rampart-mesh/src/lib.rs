//! Chunked face meshing for column height fields: visibility culling, atlas
//! texturing, vertex buffers and the backend hand-off.

pub mod atlas;
pub mod backend;
pub mod chunk;
pub mod chunk_mesh;
pub mod face_direction;
pub mod mesher;
pub mod visibility;
pub mod visible_faces;

pub use atlas::{AtlasLayout, TextureType};
pub use backend::{CommittedMesh, MeshBackend, RecordingBackend, commit_all};
pub use chunk::{ChunkRegion, chunk_layout};
pub use chunk_mesh::{ChunkMesh, MeshVertex, QuadInfo};
pub use face_direction::Face;
pub use mesher::{ChunkMesher, MeshedChunk};
pub use visibility::{FaceVisibility, count_visible_faces};
pub use visible_faces::VisibleFaces;
