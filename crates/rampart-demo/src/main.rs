//! Rampart command-line generator.
//!
//! Loads `rampart.ron` (creating it with defaults if missing), applies CLI
//! overrides, generates the terrain once and logs a summary. With
//! `--overview` it also writes a PNG map of the result.
//!
//! Run with: `cargo run -p rampart-demo -- --seed 42 --overview map.png`

use clap::Parser;
use rampart_config::{CliArgs, Config};
use rampart_mesh::RecordingBackend;
use rampart_world::TerrainGenerator;
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(Config::default_dir);
    let (mut config, load_error) = match &config_dir {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::default(), None),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    rampart_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Some(e) = load_error {
        warn!("Using default config: {e}");
    }
    info!(
        "Map: {}x{}x{} | chunk size {} | paths {}",
        config.map.width,
        config.map.depth,
        config.map.height,
        config.map.chunk_size,
        config.paths.num_paths
    );

    let overview = config.debug.overview_image.clone();
    let requested_paths = config.paths.num_paths;
    let mut generator = TerrainGenerator::new(config);
    let model = match generator.ensure_generated() {
        Ok(model) => model,
        Err(e) => {
            error!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    let field = model.height_field();
    info!(
        "Seed {} | heights {}..={} | center {}",
        model.seed(),
        field.min_column(),
        field.max_column(),
        model.center_cell()
    );
    for (i, path) in model.paths().iter().enumerate() {
        if let (Some(start), Some(end)) = (path.start(), path.end()) {
            info!("Path {i}: {} cells from {start} to {end}", path.len());
        }
    }
    if model.carve_outcome().is_degraded() {
        warn!("Only {} of {requested_paths} paths carved", model.paths().len());
    }
    info!("Build zones: {}", model.build_zones().len());

    let mut backend = RecordingBackend::new();
    let committed = model.commit_meshes(&mut backend);
    info!(
        "Meshes: {committed} chunks, {} quads, {} KiB of vertices",
        backend.total_quads(),
        backend.total_vertex_bytes() / 1024
    );

    if let Some(path) = overview
        && let Err(e) = model.save_overview(&path)
    {
        error!("{e}");
        std::process::exit(1);
    }
}
