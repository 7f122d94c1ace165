//! Buildable surface cells alongside carved paths.

use hashbrown::HashSet;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::grid::{GridCoord, GridCoord3D};
use crate::height_field::HeightField;
use crate::path::{ForbiddenCells, Path};

/// Collects build locations in the neighbourhood of path cells.
///
/// A build location is the topmost solid voxel `(x, height - 1, z)` of a
/// column that is not covered by any path footprint.
pub struct BuildZoneDeriver<'a> {
    field: &'a HeightField,
    forbidden: &'a ForbiddenCells,
}

impl<'a> BuildZoneDeriver<'a> {
    pub fn new(field: &'a HeightField, forbidden: &'a ForbiddenCells) -> Self {
        Self { field, forbidden }
    }

    /// Returns `true` if `cell` is an in-bounds surface voxel off every path.
    pub fn is_valid_build_cell(&self, cell: GridCoord3D) -> bool {
        let column = cell.column();
        match self.field.column(column.x, column.z) {
            Some(height) if height > 0 => {
                cell.y == height as i32 - 1 && !self.forbidden.contains(column)
            }
            _ => false,
        }
    }

    /// Every build location near any path, deduplicated in scan order.
    pub fn derive(&self, paths: &[Path], range: u32) -> Vec<GridCoord3D> {
        let mut zones = Vec::new();
        let mut seen = HashSet::new();
        for path in paths {
            self.scan(path, range, &mut zones, &mut seen);
        }
        tracing::debug!(zones = zones.len(), paths = paths.len(), "Derived build zones");
        zones
    }

    /// Up to `count` build locations near one path, in shuffled order.
    pub fn near_path<R: Rng + ?Sized>(
        &self,
        path: &Path,
        count: usize,
        range: u32,
        rng: &mut R,
    ) -> Vec<GridCoord3D> {
        let mut zones = Vec::new();
        let mut seen = HashSet::new();
        self.scan(path, range, &mut zones, &mut seen);
        zones.shuffle(rng);
        zones.truncate(count);
        zones
    }

    fn scan(
        &self,
        path: &Path,
        range: u32,
        zones: &mut Vec<GridCoord3D>,
        seen: &mut HashSet<GridCoord3D>,
    ) {
        let r = range as i32;
        for cell in path.cells() {
            for dz in -r..=r {
                for dx in -r..=r {
                    let column = self
                        .field
                        .clamp_coord(GridCoord::new(cell.x + dx, cell.z + dz));
                    let height = self.field.get(column.x, column.z);
                    if height == 0 {
                        continue;
                    }
                    let candidate = column.with_y(height as i32 - 1);
                    if self.is_valid_build_cell(candidate) && seen.insert(candidate) {
                        zones.push(candidate);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn straight_path() -> Path {
        // Along row z = 5 from the left edge to the center of a 10x10 map.
        Path::new((0..=5).map(|x| GridCoord::new(x, 5)).collect())
    }

    fn setup() -> (HeightField, ForbiddenCells, Path) {
        let field = HeightField::flat(10, 10, 4, 2);
        let path = straight_path();
        let mut forbidden = ForbiddenCells::new();
        forbidden.insert_path(&path, 1, &field);
        (field, forbidden, path)
    }

    #[test]
    fn test_valid_build_cell_rules() {
        let (field, forbidden, _) = setup();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);

        assert!(deriver.is_valid_build_cell(GridCoord3D::new(2, 1, 8)));
        assert!(!deriver.is_valid_build_cell(GridCoord3D::new(2, 0, 8)), "Below surface");
        assert!(!deriver.is_valid_build_cell(GridCoord3D::new(2, 2, 8)), "Above surface");
        assert!(!deriver.is_valid_build_cell(GridCoord3D::new(2, 1, 5)), "On the path");
        assert!(!deriver.is_valid_build_cell(GridCoord3D::new(2, 1, 4)), "In the footprint");
        assert!(!deriver.is_valid_build_cell(GridCoord3D::new(-1, 1, 4)), "Out of bounds");
    }

    #[test]
    fn test_derived_zones_are_valid_and_unique() {
        let (field, forbidden, path) = setup();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);
        let zones = deriver.derive(std::slice::from_ref(&path), 2);

        assert!(!zones.is_empty());
        let unique: HashSet<_> = zones.iter().copied().collect();
        assert_eq!(unique.len(), zones.len(), "Zones must be deduplicated");
        for zone in &zones {
            assert!(deriver.is_valid_build_cell(*zone));
            assert!(!forbidden.contains(zone.column()));
        }
        // Rows 3 and 7 for x in 0..=7, plus column 7 for rows 4..=6.
        assert_eq!(zones.len(), 19);
    }

    #[test]
    fn test_derive_preserves_scan_order() {
        let (field, forbidden, path) = setup();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);
        let zones = deriver.derive(std::slice::from_ref(&path), 2);
        assert_eq!(zones[0], GridCoord3D::new(0, 1, 3));
    }

    #[test]
    fn test_near_path_subset_is_valid() {
        let (field, forbidden, path) = setup();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let picked = deriver.near_path(&path, 5, 2, &mut rng);

        assert_eq!(picked.len(), 5);
        let all = deriver.derive(std::slice::from_ref(&path), 2);
        for zone in &picked {
            assert!(all.contains(zone));
            assert!(deriver.is_valid_build_cell(*zone));
        }
    }

    #[test]
    fn test_near_path_caps_at_available() {
        let (field, forbidden, path) = setup();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(deriver.near_path(&path, 1000, 2, &mut rng).len(), 19);
        assert!(deriver.near_path(&path, 5, 1, &mut rng).is_empty(), "Range 1 stays in the footprint");
    }

    #[test]
    fn test_no_paths_no_zones() {
        let field = HeightField::flat(10, 10, 4, 2);
        let forbidden = ForbiddenCells::new();
        let deriver = BuildZoneDeriver::new(&field, &forbidden);
        assert!(deriver.derive(&[], 2).is_empty());
    }
}
