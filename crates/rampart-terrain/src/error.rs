//! Terrain error types.

use std::path::PathBuf;

/// Errors raised while preparing terrain inputs.
///
/// Degenerate generation (fewer paths than requested, no build zones) is not
/// an error; see [`crate::CarveOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The heightmap image could not be opened or decoded.
    #[error("failed to load heightmap {path}: {source}")]
    HeightmapLoad {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The debug overview image could not be written.
    #[error("failed to write overview image {path}: {source}")]
    OverviewWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// A heightmap image with zero width or height.
    #[error("heightmap image is empty")]
    EmptyHeightmap,

    /// Explicit heights do not match the requested dimensions.
    #[error("expected {expected} column heights, got {actual}")]
    DimensionMismatch {
        /// `width * depth`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}
