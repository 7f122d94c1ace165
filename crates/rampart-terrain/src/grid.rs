//! Integer grid coordinates for columns and voxels.

use std::fmt;

/// A column on the map grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column index along X.
    pub x: i32,
    /// Column index along Z.
    pub z: i32,
}

impl GridCoord {
    /// Creates a grid coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Lifts the column to a voxel at layer `y`.
    pub const fn with_y(self, y: i32) -> GridCoord3D {
        GridCoord3D::new(self.x, y, self.z)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A single voxel cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord3D {
    /// Column index along X.
    pub x: i32,
    /// Layer index.
    pub y: i32,
    /// Column index along Z.
    pub z: i32,
}

impl GridCoord3D {
    /// Creates a voxel coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Drops the layer, returning the column this voxel sits in.
    pub const fn column(self) -> GridCoord {
        GridCoord::new(self.x, self.z)
    }
}

impl fmt::Display for GridCoord3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(GridCoord::new(0, 0).manhattan(GridCoord::new(5, 5)), 10);
        assert_eq!(GridCoord::new(9, 2).manhattan(GridCoord::new(5, 5)), 7);
        assert_eq!(GridCoord::new(3, 3).manhattan(GridCoord::new(3, 3)), 0);
    }

    #[test]
    fn test_column_projection() {
        let cell = GridCoord::new(4, 7).with_y(2);
        assert_eq!(cell, GridCoord3D::new(4, 2, 7));
        assert_eq!(cell.column(), GridCoord::new(4, 7));
    }
}
