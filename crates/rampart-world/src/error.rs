//! World generation error types.

use rampart_config::ConfigError;
use rampart_terrain::TerrainError;

/// Errors that stop generation before a terrain model exists.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Terrain inputs could not be prepared.
    #[error("terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
}
