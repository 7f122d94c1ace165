//! Dense column-height grid for the whole map.

use crate::error::TerrainError;
use crate::grid::GridCoord;
use crate::noise_field::NoiseField;

/// Column heights for a `width × depth` map, row-major by Z.
///
/// A height is the number of solid layers in the column, so the topmost solid
/// voxel sits at layer `height - 1`. Every entry lies in `[1, max_height]`.
/// The grid is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightField {
    width: u32,
    depth: u32,
    max_height: u32,
    heights: Vec<u32>,
}

impl HeightField {
    /// Sample every column of the map from a noise field.
    pub fn generate(field: &NoiseField, width: u32, depth: u32) -> Self {
        let mut heights = Vec::with_capacity(width as usize * depth as usize);
        for z in 0..depth as i32 {
            for x in 0..width as i32 {
                heights.push(field.height(x, z));
            }
        }
        let height_field = Self {
            width,
            depth,
            max_height: field.max_height().max(1),
            heights,
        };
        tracing::debug!(
            width,
            depth,
            min = height_field.min_column(),
            max = height_field.max_column(),
            "Sampled height field"
        );
        height_field
    }

    /// Build from explicit heights, clamping each into `[1, max_height]`.
    pub fn from_heights(
        width: u32,
        depth: u32,
        max_height: u32,
        heights: Vec<u32>,
    ) -> Result<Self, TerrainError> {
        let expected = width as usize * depth as usize;
        if heights.len() != expected {
            return Err(TerrainError::DimensionMismatch {
                expected,
                actual: heights.len(),
            });
        }
        let max_height = max_height.max(1);
        let heights = heights
            .into_iter()
            .map(|h| h.clamp(1, max_height))
            .collect();
        Ok(Self {
            width,
            depth,
            max_height,
            heights,
        })
    }

    /// A field where every column has the same height.
    pub fn flat(width: u32, depth: u32, max_height: u32, height: u32) -> Self {
        let max_height = max_height.max(1);
        Self {
            width,
            depth,
            max_height,
            heights: vec![height.clamp(1, max_height); width as usize * depth as usize],
        }
    }

    /// Map extent along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map extent along Z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Upper bound for every column.
    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    /// Returns `true` if the column lies inside the map.
    pub fn contains(&self, cell: GridCoord) -> bool {
        cell.x >= 0 && cell.z >= 0 && (cell.x as u32) < self.width && (cell.z as u32) < self.depth
    }

    /// Clamp a column onto the nearest in-bounds cell.
    pub fn clamp_coord(&self, cell: GridCoord) -> GridCoord {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_z = self.depth.saturating_sub(1) as i32;
        GridCoord::new(cell.x.clamp(0, max_x), cell.z.clamp(0, max_z))
    }

    /// Height of an in-bounds column, `None` outside the map.
    pub fn column(&self, x: i32, z: i32) -> Option<u32> {
        if !self.contains(GridCoord::new(x, z)) {
            return None;
        }
        self.heights
            .get(z as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Height at `(x, z)`, clamping the coordinate to the map border.
    ///
    /// Returns `0` only for an empty map.
    pub fn get(&self, x: i32, z: i32) -> u32 {
        let cell = self.clamp_coord(GridCoord::new(x, z));
        self.column(cell.x, cell.z).unwrap_or(0)
    }

    /// The target cell every path ends at: `(width / 2, depth / 2)`.
    pub fn center(&self) -> GridCoord {
        GridCoord::new((self.width / 2) as i32, (self.depth / 2) as i32)
    }

    /// Returns `true` for in-bounds cells on the outer ring of the map.
    pub fn is_boundary(&self, cell: GridCoord) -> bool {
        self.contains(cell)
            && (cell.x == 0
                || cell.z == 0
                || cell.x as u32 == self.width - 1
                || cell.z as u32 == self.depth - 1)
    }

    /// All boundary cells in row-major order.
    pub fn boundary_cells(&self) -> Vec<GridCoord> {
        (0..self.depth as i32)
            .flat_map(|z| (0..self.width as i32).map(move |x| GridCoord::new(x, z)))
            .filter(|&cell| self.is_boundary(cell))
            .collect()
    }

    /// Lowest column height.
    pub fn min_column(&self) -> u32 {
        self.heights.iter().copied().min().unwrap_or(0)
    }

    /// Highest column height.
    pub fn max_column(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Raw row-major heights.
    pub fn as_slice(&self) -> &[u32] {
        &self.heights
    }
}
