//! The generated terrain and its queries.

use std::path::Path as FsPath;

use glam::Vec3;
use rampart_config::{Config, MapConfig};
use rampart_mesh::{ChunkMesher, MeshBackend, MeshedChunk, chunk_layout, commit_all};
use rampart_terrain::debug_viz::{OverviewLayers, save_overview};
use rampart_terrain::{
    BiomeClassifier, BuildZoneDeriver, CarveOutcome, ForbiddenCells, GridCoord, GridCoord3D,
    HeightField, NoiseField, Path, PathCarver, PathRules, SeedStream, TerrainError, resolve_seed,
    stream_rng,
};

use crate::error::WorldError;

/// Overview pixels per map column.
const OVERVIEW_PIXELS_PER_CELL: u32 = 4;

/// Everything generation produced. Immutable once built.
#[derive(Debug)]
pub struct TerrainModel {
    seed: u64,
    map: MapConfig,
    build_zone_range: u32,
    field: HeightField,
    biomes: BiomeClassifier,
    outcome: CarveOutcome,
    forbidden: ForbiddenCells,
    build_zones: Vec<GridCoord3D>,
    chunks: Vec<MeshedChunk>,
}

/// Run the full pipeline: heights, paths, build zones, then chunk meshes.
///
/// A missing seed is drawn at random and logged so the run can be repeated.
pub fn generate(config: &Config) -> Result<TerrainModel, WorldError> {
    config.validate()?;
    let seed = resolve_seed(config.seed);
    let map = &config.map;

    let noise = NoiseField::from_config(config, seed)?;
    let field = HeightField::generate(&noise, map.width, map.depth);
    let biomes = BiomeClassifier::new(&config.biome, seed);

    let carved = PathCarver::new(&field, PathRules::from(&config.paths), seed).carve();
    let build_zones = BuildZoneDeriver::new(&field, &carved.forbidden)
        .derive(carved.outcome.paths(), config.paths.build_zone_range);

    let regions = chunk_layout(map.width, map.depth, map.height, map.chunk_size);
    let chunks = ChunkMesher::from_config(&field, &biomes, &config.mesh).mesh_all(&regions);

    tracing::info!(
        seed,
        width = map.width,
        depth = map.depth,
        paths = carved.outcome.paths().len(),
        build_zones = build_zones.len(),
        chunks = chunks.len(),
        "Generated terrain"
    );

    Ok(TerrainModel {
        seed,
        map: map.clone(),
        build_zone_range: config.paths.build_zone_range,
        field,
        biomes,
        outcome: carved.outcome,
        forbidden: carved.forbidden,
        build_zones,
        chunks,
    })
}

impl TerrainModel {
    /// Seed the model was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn biomes(&self) -> &BiomeClassifier {
        &self.biomes
    }

    /// Column height at `(x, z)`, clamping the coordinate onto the map.
    pub fn surface_height(&self, x: i32, z: i32) -> u32 {
        self.field.get(x, z)
    }

    /// World-space point on top of a column's surface voxel, centred in the
    /// cell.
    pub fn surface_world_position(&self, cell: GridCoord) -> Vec3 {
        let cell = self.field.clamp_coord(cell);
        let height = self.field.get(cell.x, cell.z);
        let scale = self.map.cell_scale;
        Vec3::from(self.map.origin)
            + Vec3::new(
                (cell.x as f32 + 0.5) * scale,
                height as f32 * scale,
                (cell.z as f32 + 0.5) * scale,
            )
    }

    /// Returns `true` if `cell` is a surface voxel outside every path footprint.
    pub fn is_valid_build_cell(&self, cell: GridCoord3D) -> bool {
        BuildZoneDeriver::new(&self.field, &self.forbidden).is_valid_build_cell(cell)
    }

    /// Accepted paths, entrance first.
    pub fn paths(&self) -> &[Path] {
        self.outcome.paths()
    }

    /// Whether the requested path count was met.
    pub fn carve_outcome(&self) -> &CarveOutcome {
        &self.outcome
    }

    /// Dilated footprint of every path.
    pub fn forbidden_cells(&self) -> &ForbiddenCells {
        &self.forbidden
    }

    /// Every build location, in scan order.
    pub fn build_zones(&self) -> &[GridCoord3D] {
        &self.build_zones
    }

    /// Up to `count` shuffled build locations within `range` of one path.
    ///
    /// The shuffle is seeded from the world seed and path index, so repeated
    /// calls return the same cells. Unknown path indices yield nothing.
    pub fn build_zones_near(&self, path_index: usize, count: usize, range: u32) -> Vec<GridCoord3D> {
        let Some(path) = self.paths().get(path_index) else {
            return Vec::new();
        };
        let mut rng = stream_rng(self.seed, SeedStream::BuildZones(path_index as u32));
        BuildZoneDeriver::new(&self.field, &self.forbidden).near_path(path, count, range, &mut rng)
    }

    /// [`build_zones_near`](Self::build_zones_near) with the configured range.
    pub fn default_build_zones_near(&self, path_index: usize, count: usize) -> Vec<GridCoord3D> {
        self.build_zones_near(path_index, count, self.build_zone_range)
    }

    /// The cell every path ends at.
    pub fn center_cell(&self) -> GridCoord {
        self.field.center()
    }

    /// Non-empty chunk meshes in chunk order.
    pub fn chunks(&self) -> &[MeshedChunk] {
        &self.chunks
    }

    /// Hand every chunk mesh to a backend. Returns the number committed.
    pub fn commit_meshes<B: MeshBackend + ?Sized>(&self, backend: &mut B) -> usize {
        commit_all(backend, &self.chunks)
    }

    /// Write a top-down PNG of heights, biomes, paths and build zones.
    pub fn save_overview(&self, path: &FsPath) -> Result<(), TerrainError> {
        let layers = OverviewLayers {
            field: &self.field,
            biomes: &self.biomes,
            paths: self.paths(),
            forbidden: &self.forbidden,
            build_zones: &self.build_zones,
        };
        save_overview(&layers, OVERVIEW_PIXELS_PER_CELL, path)
    }
}
