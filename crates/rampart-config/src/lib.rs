//! Configuration system for Rampart terrain generation.
//!
//! Every generation parameter lives here and persists to disk as a RON file.
//! Supports CLI overrides via clap and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeConfig, CONFIG_FILE_NAME, Config, DebugConfig, HeightmapConfig, MapConfig, MeshConfig,
    NoiseConfig, PathConfig,
};
pub use error::ConfigError;
