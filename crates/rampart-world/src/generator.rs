//! Lazy, idempotent wrapper around [`generate`].

use glam::Vec3;
use rampart_config::Config;
use rampart_mesh::{MeshBackend, MeshedChunk};
use rampart_terrain::{CarveOutcome, GridCoord, GridCoord3D, Path};

use crate::error::WorldError;
use crate::model::{TerrainModel, generate};

/// Lifecycle of a [`TerrainGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// Nothing generated yet.
    Uninitialized,
    /// Generation is running.
    Generating,
    /// A terrain model is available.
    Ready,
}

/// Owns a configuration and, once generated, the terrain built from it.
///
/// Queries return `None`, `false` or an empty list until the generator is
/// [`Ready`](GeneratorState::Ready). None of them mutate state.
pub struct TerrainGenerator {
    config: Config,
    generating: bool,
    model: Option<Box<TerrainModel>>,
}

impl TerrainGenerator {
    /// Create an uninitialized generator. Nothing is generated until
    /// [`ensure_generated`](Self::ensure_generated).
    pub fn new(config: Config) -> Self {
        Self {
            config,
            generating: false,
            model: None,
        }
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GeneratorState {
        match (&self.model, self.generating) {
            (Some(_), _) => GeneratorState::Ready,
            (None, true) => GeneratorState::Generating,
            (None, false) => GeneratorState::Uninitialized,
        }
    }

    /// `true` once a terrain model exists.
    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Generate on first call; later calls return the existing model.
    ///
    /// On failure the generator returns to `Uninitialized` so the call can be
    /// retried.
    pub fn ensure_generated(&mut self) -> Result<&TerrainModel, WorldError> {
        let model = match self.model.take() {
            Some(model) => {
                tracing::debug!("Terrain already generated");
                model
            }
            None => {
                self.generating = true;
                let result = generate(&self.config);
                self.generating = false;
                let model = result.inspect_err(|err| {
                    tracing::error!(error = %err, "Terrain generation failed");
                })?;
                Box::new(model)
            }
        };
        let model: &TerrainModel = self.model.insert(model);
        Ok(model)
    }

    /// The generated model, once ready.
    pub fn model(&self) -> Option<&TerrainModel> {
        self.model.as_deref()
    }

    pub fn surface_height(&self, x: i32, z: i32) -> Option<u32> {
        self.model().map(|m| m.surface_height(x, z))
    }

    pub fn surface_world_position(&self, cell: GridCoord) -> Option<Vec3> {
        self.model().map(|m| m.surface_world_position(cell))
    }

    pub fn is_valid_build_cell(&self, cell: GridCoord3D) -> bool {
        self.model().is_some_and(|m| m.is_valid_build_cell(cell))
    }

    pub fn paths(&self) -> &[Path] {
        self.model().map(|m| m.paths()).unwrap_or_default()
    }

    pub fn build_zones(&self) -> &[GridCoord3D] {
        self.model().map(|m| m.build_zones()).unwrap_or_default()
    }

    pub fn build_zones_near(&self, path_index: usize, count: usize, range: u32) -> Vec<GridCoord3D> {
        self.model()
            .map(|m| m.build_zones_near(path_index, count, range))
            .unwrap_or_default()
    }

    pub fn center_cell(&self) -> Option<GridCoord> {
        self.model().map(|m| m.center_cell())
    }

    pub fn carve_outcome(&self) -> Option<&CarveOutcome> {
        self.model().map(|m| m.carve_outcome())
    }

    pub fn chunks(&self) -> &[MeshedChunk] {
        self.model().map(|m| m.chunks()).unwrap_or_default()
    }

    /// Commit chunk meshes to a backend. Commits nothing before ready.
    pub fn commit_meshes<B: MeshBackend + ?Sized>(&self, backend: &mut B) -> usize {
        self.model().map_or(0, |m| m.commit_meshes(backend))
    }
}
