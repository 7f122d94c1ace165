//! Voxel landscape generation: column heights, biomes, boundary-to-center
//! paths and the build locations alongside them.

mod biome;
mod build_zone;
mod error;
mod grid;
mod height_field;
mod heightmap_image;
mod noise_field;
mod path;

pub mod debug_viz;
pub mod seed;

pub use biome::{ARID_THRESHOLD, Biome, BiomeClassifier};
pub use build_zone::BuildZoneDeriver;
pub use error::TerrainError;
pub use grid::{GridCoord, GridCoord3D};
pub use height_field::HeightField;
pub use heightmap_image::HeightmapImage;
pub use noise_field::{FractalNoise, HeightSource, NoiseField};
pub use path::{CarveOutcome, CarvedPaths, ForbiddenCells, Path, PathCarver, PathRules};
pub use seed::{SeedStream, derive_seed, resolve_seed, stream_rng};
