//! Command-line argument parsing for Rampart.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Rampart command-line arguments.
///
/// CLI values override settings loaded from `rampart.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "rampart", about = "Voxel landscape generator")]
pub struct CliArgs {
    /// Map width in columns.
    #[arg(long)]
    pub width: Option<u32>,

    /// Map depth in columns.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Maximum column height.
    #[arg(long)]
    pub height: Option<u32>,

    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of paths to carve.
    #[arg(long)]
    pub paths: Option<u32>,

    /// Mesh chunks on a worker pool.
    #[arg(long)]
    pub parallel: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a PNG overview of the generated map.
    #[arg(long)]
    pub overview: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.map.width = w;
        }
        if let Some(d) = args.depth {
            self.map.depth = d;
        }
        if let Some(h) = args.height {
            self.map.height = h;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(n) = args.paths {
            self.paths.num_paths = n;
        }
        if let Some(parallel) = args.parallel {
            self.mesh.parallel = parallel;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.overview {
            self.debug.overview_image = Some(path.clone());
        }
    }
}
