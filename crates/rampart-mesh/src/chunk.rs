//! Partition of the map into fixed-size meshing chunks.

use rampart_terrain::GridCoord;

/// A rectangular block of columns meshed together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRegion {
    /// Position in [`chunk_layout`] order.
    pub index: usize,
    /// Cell of the chunk's minimum corner.
    pub origin: GridCoord,
    /// Columns along X.
    pub width: u32,
    /// Columns along Z.
    pub depth: u32,
    /// Vertical extent in layers.
    pub height: u32,
}

impl ChunkRegion {
    /// Returns `true` if the map column lies inside this chunk.
    pub fn contains(&self, cell: GridCoord) -> bool {
        cell.x >= self.origin.x
            && cell.z >= self.origin.z
            && cell.x < self.origin.x + self.width as i32
            && cell.z < self.origin.z + self.depth as i32
    }

    /// Map columns of the chunk, row-major by Z.
    pub fn columns(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.depth as i32).flat_map(move |dz| {
            (0..self.width as i32)
                .map(move |dx| GridCoord::new(self.origin.x + dx, self.origin.z + dz))
        })
    }
}

/// Split a `width × depth` map into `chunk_size` squares, row-major by Z.
///
/// Chunks on the far edges are trimmed to the map.
pub fn chunk_layout(width: u32, depth: u32, height: u32, chunk_size: u32) -> Vec<ChunkRegion> {
    let size = chunk_size.max(1);
    let mut chunks = Vec::new();
    for cz in (0..depth).step_by(size as usize) {
        for cx in (0..width).step_by(size as usize) {
            chunks.push(ChunkRegion {
                index: chunks.len(),
                origin: GridCoord::new(cx as i32, cz as i32),
                width: size.min(width - cx),
                depth: size.min(depth - cz),
                height,
            });
        }
    }
    chunks
}
