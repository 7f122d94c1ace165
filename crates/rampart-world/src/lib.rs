//! One-shot terrain generation and the query surface other systems read.
//!
//! [`generate`] runs the whole pipeline (height field, path carving, build
//! zones, chunk meshing) and returns an immutable [`TerrainModel`].
//! [`TerrainGenerator`] wraps it for callers that want to trigger generation
//! lazily and poll for readiness.

mod error;
mod generator;
mod model;

pub use error::WorldError;
pub use generator::{GeneratorState, TerrainGenerator};
pub use model::{TerrainModel, generate};
