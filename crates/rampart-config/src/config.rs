//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "rampart.ron";

/// Top-level generation configuration.
///
/// All values must be set before the first generation call; changing them on
/// an already generated terrain has no effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World seed. `None` draws a fresh seed at startup.
    pub seed: Option<u64>,
    /// Map extents and world transform.
    pub map: MapConfig,
    /// Height field noise settings.
    pub noise: NoiseConfig,
    /// Biome classification settings.
    pub biome: BiomeConfig,
    /// Optional heightmap image input.
    pub heightmap: HeightmapConfig,
    /// Path carving and build-zone settings.
    pub paths: PathConfig,
    /// Chunk meshing settings.
    pub mesh: MeshConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Map extents, chunking, and the grid-to-world transform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Number of columns along X.
    pub width: u32,
    /// Number of columns along Z.
    pub depth: u32,
    /// Maximum column height in voxels (vertical extent of every chunk).
    pub height: u32,
    /// Side length of a square chunk in columns.
    pub chunk_size: u32,
    /// World-space position of grid cell (0, 0) at layer 0.
    pub origin: [f32; 3],
    /// World units per voxel.
    pub cell_scale: f32,
}

/// Height field noise configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Use fractal noise. When `false` the map is flat at
    /// `min_column_height + amplitude`.
    pub enabled: bool,
    /// Lowest column height noise can produce.
    pub min_column_height: u32,
    /// Height range added on top of `min_column_height`.
    pub amplitude: u32,
    /// Base sampling scale applied to grid coordinates.
    pub scale: f64,
    /// Offset added to `(x, z)` before scaling.
    pub offset: [f64; 2],
    /// Number of noise layers summed.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
}

/// Biome classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    /// Classify biomes from noise. When `false` every column is vegetated.
    pub enabled: bool,
    /// Sampling scale of the biome noise.
    pub scale: f64,
    /// Offset added to `(x, z)` before scaling.
    pub offset: [f64; 2],
}

/// Heightmap image configuration. An image, when present, replaces noise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeightmapConfig {
    /// Path to a grayscale (or any) image file.
    pub image: Option<PathBuf>,
    /// Column height for a fully white sample.
    pub elevation_scale: f64,
}

/// Path carving and build-zone configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathConfig {
    /// Number of paths requested.
    pub num_paths: u32,
    /// Half-width of the forbidden footprint around each path cell.
    pub path_half_width: u32,
    /// Minimum number of cells an accepted path must have.
    pub min_path_length: u32,
    /// Maximum cells an accepted path may share with any other accepted path.
    pub max_overlap: u32,
    /// Upper bound on carving attempts.
    pub max_attempts: u32,
    /// Half-width of the neighbourhood scanned around path cells for build zones.
    pub build_zone_range: u32,
}

/// Chunk meshing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Tiles per row of the square texture atlas.
    pub tiles_per_row: u32,
    /// Emit the bottom faces of layer 0.
    pub emit_floor_faces: bool,
    /// Mesh chunks on a worker pool.
    pub parallel: bool,
    /// Worker threads for parallel meshing (0 = one per CPU).
    pub worker_count: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a PNG overview of the generated map to this path.
    pub overview_image: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 64,
            depth: 64,
            height: 16,
            chunk_size: 16,
            origin: [0.0, 0.0, 0.0],
            cell_scale: 1.0,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_column_height: 2,
            amplitude: 6,
            scale: 0.05,
            offset: [0.0, 0.0],
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 0.03,
            offset: [1000.0, 1000.0],
        }
    }
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            image: None,
            elevation_scale: 10.0,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            num_paths: 3,
            path_half_width: 1,
            min_path_length: 10,
            max_overlap: 2,
            max_attempts: 100,
            build_zone_range: 2,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            tiles_per_row: 4,
            emit_floor_faces: false,
            parallel: false,
            worker_count: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            overview_image: None,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Default config directory (`<platform config dir>/rampart`), if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rampart"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `rampart.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values generation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let map = &self.map;
        if map.width == 0 || map.depth == 0 || map.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "map extents must be non-zero, got {}x{}x{}",
                map.width, map.depth, map.height
            )));
        }
        if map.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".into()));
        }
        if !(map.cell_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_scale must be positive, got {}",
                map.cell_scale
            )));
        }
        if self.noise.enabled && self.noise.octaves == 0 {
            return Err(ConfigError::Invalid(
                "noise.octaves must be at least 1 when noise is enabled".into(),
            ));
        }
        let samplers = [
            ("noise.scale", self.noise.scale),
            ("noise.offset[0]", self.noise.offset[0]),
            ("noise.offset[1]", self.noise.offset[1]),
            ("noise.persistence", self.noise.persistence),
            ("noise.lacunarity", self.noise.lacunarity),
            ("biome.scale", self.biome.scale),
            ("biome.offset[0]", self.biome.offset[0]),
            ("biome.offset[1]", self.biome.offset[1]),
            ("heightmap.elevation_scale", self.heightmap.elevation_scale),
        ];
        if let Some((name, value)) = samplers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }
        // Grass, dirt, sand and stone each need a tile.
        if self.mesh.tiles_per_row < 2 {
            return Err(ConfigError::Invalid(format!(
                "mesh.tiles_per_row must be at least 2, got {}",
                self.mesh.tiles_per_row
            )));
        }
        Ok(())
    }
}
