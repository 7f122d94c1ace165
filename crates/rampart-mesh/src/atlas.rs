//! Terrain texture atlas: a square grid of equally sized tiles.
//!
//! Each [`TextureType`] owns one tile. UV rectangles are computed from the
//! tile index, row-major from the top-left corner of the atlas.

use glam::Vec2;
use rampart_terrain::Biome;

use crate::face_direction::Face;

/// Surface material drawn on a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureType {
    /// Vegetated top surface.
    Grass,
    /// Vegetated soil below the surface.
    Dirt,
    /// Every arid face above the base layer.
    Sand,
    /// Base layer.
    Stone,
}

impl TextureType {
    /// All texture types in atlas order.
    pub const ALL: [TextureType; 4] = [Self::Grass, Self::Dirt, Self::Sand, Self::Stone];

    /// Tile slot inside the atlas.
    pub fn tile_index(self) -> u32 {
        match self {
            Self::Grass => 0,
            Self::Dirt => 1,
            Self::Sand => 2,
            Self::Stone => 3,
        }
    }

    /// Pick the texture for one face of the voxel at `layer` in a column of
    /// `column_height` solid layers.
    ///
    /// The top face of the topmost layer shows the biome's surface material.
    /// Every other face of the bottom layer is stone, and the rest show the
    /// biome's subsurface material.
    pub fn for_face(face: Face, layer: u32, column_height: u32, biome: Biome) -> Self {
        let is_surface = face == Face::Top && layer + 1 == column_height;
        match (is_surface, layer, biome) {
            (true, _, Biome::Vegetated) => Self::Grass,
            (true, _, Biome::Arid) => Self::Sand,
            (false, 0, _) => Self::Stone,
            (false, _, Biome::Vegetated) => Self::Dirt,
            (false, _, Biome::Arid) => Self::Sand,
        }
    }
}

/// Grid layout of the atlas texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtlasLayout {
    tiles_per_row: u32,
}

impl AtlasLayout {
    /// Creates a layout with `tiles_per_row` tiles along each side.
    ///
    /// Clamped to at least 2 so every [`TextureType`] has a slot.
    pub fn new(tiles_per_row: u32) -> Self {
        Self {
            tiles_per_row: tiles_per_row.max(2),
        }
    }

    /// Returns the number of tiles that fit in one row of the atlas.
    pub fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    /// Returns `(uv_min, uv_max)` for a tile slot.
    pub fn tile_uvs(&self, tile_index: u32) -> (Vec2, Vec2) {
        let col = tile_index % self.tiles_per_row;
        let row = tile_index / self.tiles_per_row;
        let tile_uv_size = 1.0 / self.tiles_per_row as f32;

        let u_min = col as f32 * tile_uv_size;
        let v_min = row as f32 * tile_uv_size;

        (
            Vec2::new(u_min, v_min),
            Vec2::new(u_min + tile_uv_size, v_min + tile_uv_size),
        )
    }

    /// Returns `(uv_min, uv_max)` for a texture.
    pub fn texture_uvs(&self, texture: TextureType) -> (Vec2, Vec2) {
        self.tile_uvs(texture.tile_index())
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(4)
    }
}
