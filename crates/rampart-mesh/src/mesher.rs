//! Per-chunk face meshing, sequential or on a scoped worker pool.
//!
//! Each chunk reads only the shared height field and biome classifier and
//! writes into its own buffers, so chunks can be meshed in any order. Worker
//! results are put back in chunk order before they are returned.

use rampart_config::MeshConfig;
use rampart_terrain::{BiomeClassifier, HeightField};

use crate::atlas::{AtlasLayout, TextureType};
use crate::chunk::ChunkRegion;
use crate::chunk_mesh::ChunkMesh;
use crate::visibility::FaceVisibility;

/// A chunk together with its non-empty mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshedChunk {
    /// Where the chunk sits in the map.
    pub region: ChunkRegion,
    /// Geometry in chunk-local coordinates.
    pub mesh: ChunkMesh,
}

/// Builds chunk meshes from a height field.
pub struct ChunkMesher<'a> {
    field: &'a HeightField,
    biomes: &'a BiomeClassifier,
    atlas: AtlasLayout,
    emit_floor_faces: bool,
    parallel: bool,
    worker_count: usize,
}

impl<'a> ChunkMesher<'a> {
    /// Sequential mesher with the default atlas.
    pub fn new(field: &'a HeightField, biomes: &'a BiomeClassifier) -> Self {
        Self {
            field,
            biomes,
            atlas: AtlasLayout::default(),
            emit_floor_faces: false,
            parallel: false,
            worker_count: 1,
        }
    }

    /// Mesher configured from the `mesh` config section.
    ///
    /// A `worker_count` of 0 uses one worker per logical CPU.
    pub fn from_config(
        field: &'a HeightField,
        biomes: &'a BiomeClassifier,
        config: &MeshConfig,
    ) -> Self {
        let worker_count = match config.worker_count {
            0 => num_cpus::get(),
            n => n as usize,
        };
        Self {
            field,
            biomes,
            atlas: AtlasLayout::new(config.tiles_per_row),
            emit_floor_faces: config.emit_floor_faces,
            parallel: config.parallel,
            worker_count,
        }
    }

    /// Switch between sequential and pooled meshing.
    pub fn with_parallel(mut self, parallel: bool, worker_count: usize) -> Self {
        self.parallel = parallel;
        self.worker_count = worker_count.max(1);
        self
    }

    /// Mesh one chunk. Returns `None` if it has no visible faces.
    pub fn mesh_chunk(&self, region: &ChunkRegion) -> Option<ChunkMesh> {
        let visibility = FaceVisibility::new(self.field, self.emit_floor_faces);
        let mut mesh = ChunkMesh::new();

        for cell in region.columns() {
            let column_height = self.field.get(cell.x, cell.z);
            let biome = self.biomes.biome(cell.x, cell.z);
            let local_x = (cell.x - region.origin.x) as u32;
            let local_z = (cell.z - region.origin.z) as u32;

            for layer in 0..column_height.min(region.height) {
                let faces = visibility.visible_faces(cell.x, layer as i32, cell.z);
                for face in faces.iter() {
                    let texture = TextureType::for_face(face, layer, column_height, biome);
                    mesh.push_face(
                        face,
                        [local_x, layer, local_z],
                        self.atlas.texture_uvs(texture),
                        texture,
                    );
                }
            }
        }

        (!mesh.is_empty()).then_some(mesh)
    }

    /// Mesh every chunk, dropping empty ones. Output is in chunk order.
    pub fn mesh_all(&self, chunks: &[ChunkRegion]) -> Vec<MeshedChunk> {
        let meshed = if self.parallel && self.worker_count > 1 && chunks.len() > 1 {
            self.mesh_parallel(chunks)
        } else {
            chunks
                .iter()
                .filter_map(|region| {
                    self.mesh_chunk(region).map(|mesh| MeshedChunk {
                        region: *region,
                        mesh,
                    })
                })
                .collect()
        };

        tracing::debug!(
            chunks = chunks.len(),
            meshed = meshed.len(),
            quads = meshed.iter().map(|m| m.mesh.quad_count()).sum::<usize>(),
            parallel = self.parallel,
            "Meshed terrain chunks"
        );
        meshed
    }

    fn mesh_parallel(&self, chunks: &[ChunkRegion]) -> Vec<MeshedChunk> {
        let workers = self.worker_count.min(chunks.len());
        let (task_tx, task_rx) = crossbeam_channel::unbounded::<ChunkRegion>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<MeshedChunk>();

        for region in chunks {
            // Receiver is alive until the scope below ends.
            let _ = task_tx.send(*region);
        }
        drop(task_tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let rx = task_rx.clone();
                let tx = result_tx.clone();
                scope.spawn(move || {
                    while let Ok(region) = rx.recv() {
                        let Some(mesh) = self.mesh_chunk(&region) else {
                            continue;
                        };
                        if tx.send(MeshedChunk { region, mesh }).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut meshed: Vec<MeshedChunk> = result_rx.iter().collect();
        meshed.sort_by_key(|m| m.region.index);
        meshed
    }
}
