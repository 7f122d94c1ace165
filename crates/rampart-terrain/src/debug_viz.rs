//! Top-down map overview for diagnosing generation.
//!
//! One pixel block per column: terrain shaded by height and tinted by biome,
//! with path footprints, path cells, build zones and the center marked on top.

use std::path::Path as FsPath;

use image::{Rgba, RgbaImage};

use crate::biome::{Biome, BiomeClassifier};
use crate::error::TerrainError;
use crate::grid::{GridCoord, GridCoord3D};
use crate::height_field::HeightField;
use crate::path::{ForbiddenCells, Path};

const FOOTPRINT: Rgba<u8> = Rgba([150, 110, 80, 255]);
const PATH: Rgba<u8> = Rgba([200, 40, 30, 255]);
const BUILD_ZONE: Rgba<u8> = Rgba([40, 90, 220, 255]);
const CENTER: Rgba<u8> = Rgba([250, 220, 30, 255]);

/// Everything the overview draws.
pub struct OverviewLayers<'a> {
    /// Base layer, shaded by height.
    pub field: &'a HeightField,
    /// Picks the color ramp per column.
    pub biomes: &'a BiomeClassifier,
    /// Drawn over the footprints.
    pub paths: &'a [Path],
    /// Widened path footprints.
    pub forbidden: &'a ForbiddenCells,
    /// Drawn last, over paths.
    pub build_zones: &'a [GridCoord3D],
}

/// Map a normalized height `[0, 1]` and biome to an RGB color.
///
/// Vegetated columns run from dark to light green, arid ones from ochre to
/// pale sand.
pub fn height_to_color(normalized: f64, biome: Biome) -> (u8, u8, u8) {
    let t = normalized.clamp(0.0, 1.0);
    match biome {
        Biome::Vegetated => (
            (30.0 + t * 90.0) as u8,
            (100.0 + t * 110.0) as u8,
            (30.0 + t * 50.0) as u8,
        ),
        Biome::Arid => (
            (170.0 + t * 70.0) as u8,
            (140.0 + t * 80.0) as u8,
            (70.0 + t * 90.0) as u8,
        ),
    }
}

/// Render the overview with `pixels_per_cell` pixels along each side of a
/// column.
pub fn render_overview(layers: &OverviewLayers<'_>, pixels_per_cell: u32) -> RgbaImage {
    let scale = pixels_per_cell.max(1);
    let field = layers.field;
    let mut image = RgbaImage::new(field.width() * scale, field.depth() * scale);
    let range = field.max_height().saturating_sub(1).max(1) as f64;

    let mut fill = |cell: GridCoord, color: Rgba<u8>| {
        if !field.contains(cell) {
            return;
        }
        for py in 0..scale {
            for px in 0..scale {
                image.put_pixel(cell.x as u32 * scale + px, cell.z as u32 * scale + py, color);
            }
        }
    };

    for z in 0..field.depth() as i32 {
        for x in 0..field.width() as i32 {
            let normalized = (field.get(x, z).saturating_sub(1)) as f64 / range;
            let (r, g, b) = height_to_color(normalized, layers.biomes.biome(x, z));
            fill(GridCoord::new(x, z), Rgba([r, g, b, 255]));
        }
    }
    for &cell in layers.forbidden.iter() {
        fill(cell, FOOTPRINT);
    }
    for path in layers.paths {
        for &cell in path.cells() {
            fill(cell, PATH);
        }
    }
    for zone in layers.build_zones {
        fill(zone.column(), BUILD_ZONE);
    }
    fill(field.center(), CENTER);

    image
}

/// Render and write the overview as a PNG.
pub fn save_overview(
    layers: &OverviewLayers<'_>,
    pixels_per_cell: u32,
    path: &FsPath,
) -> Result<(), TerrainError> {
    let image = render_overview(layers, pixels_per_cell);
    image
        .save(path)
        .map_err(|source| TerrainError::OverviewWrite {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "Wrote map overview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers_fixture() -> (HeightField, BiomeClassifier, Vec<Path>, ForbiddenCells) {
        let field = HeightField::flat(10, 10, 4, 2);
        let path = Path::new((0..=5).map(|x| GridCoord::new(x, 5)).collect());
        let mut forbidden = ForbiddenCells::new();
        forbidden.insert_path(&path, 1, &field);
        (field, BiomeClassifier::disabled(), vec![path], forbidden)
    }

    #[test]
    fn test_height_to_color_ramps() {
        let low = height_to_color(0.0, Biome::Vegetated);
        let high = height_to_color(1.0, Biome::Vegetated);
        assert!(high.1 > low.1, "Higher columns should be lighter");
        assert_ne!(height_to_color(0.5, Biome::Vegetated), height_to_color(0.5, Biome::Arid));
    }

    #[test]
    fn test_overview_dimensions_and_markers() {
        let (field, biomes, paths, forbidden) = layers_fixture();
        let zones = vec![GridCoord3D::new(2, 1, 8)];
        let layers = OverviewLayers {
            field: &field,
            biomes: &biomes,
            paths: &paths,
            forbidden: &forbidden,
            build_zones: &zones,
        };
        let image = render_overview(&layers, 3);
        assert_eq!(image.dimensions(), (30, 30));
        assert_eq!(*image.get_pixel(0, 15), PATH);
        assert_eq!(*image.get_pixel(0, 12), FOOTPRINT);
        assert_eq!(*image.get_pixel(6, 24), BUILD_ZONE);
        assert_eq!(*image.get_pixel(15, 15), CENTER);
    }

    #[test]
    fn test_save_overview_writes_png() {
        let (field, biomes, paths, forbidden) = layers_fixture();
        let layers = OverviewLayers {
            field: &field,
            biomes: &biomes,
            paths: &paths,
            forbidden: &forbidden,
            build_zones: &[],
        };
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("overview.png");
        save_overview(&layers, 2, &out).unwrap();

        let reloaded = image::open(&out).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (20, 20));
    }
}
