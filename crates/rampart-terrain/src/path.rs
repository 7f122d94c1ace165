//! Boundary-to-center path carving.
//!
//! [`PathCarver`] picks random entrances on the map ring and walks each one
//! greedily toward the center, preferring the flattest step. Accepted paths
//! are dilated into [`ForbiddenCells`] so nothing gets built on them.

use hashbrown::HashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rampart_config::PathConfig;

use crate::grid::GridCoord;
use crate::height_field::HeightField;
use crate::seed::{SeedStream, stream_rng};

/// An ordered 4-connected walk from a boundary entrance to the map center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<GridCoord>,
}

impl Path {
    /// Wrap an ordered list of cells.
    pub fn new(cells: Vec<GridCoord>) -> Self {
        Self { cells }
    }

    /// Cells from entrance to center.
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// Number of cells, entrance and center included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entrance cell.
    pub fn start(&self) -> Option<GridCoord> {
        self.cells.first().copied()
    }

    /// Final cell.
    pub fn end(&self) -> Option<GridCoord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, cell: GridCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of distinct cells shared with `other`.
    pub fn overlap(&self, other: &Path) -> usize {
        let theirs: HashSet<GridCoord> = other.cells.iter().copied().collect();
        let mine: HashSet<GridCoord> = self.cells.iter().copied().collect();
        mine.intersection(&theirs).count()
    }

    /// Returns `true` if every step moves exactly one unit along one axis.
    pub fn is_connected(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].manhattan(w[1]) == 1)
    }
}

/// Columns covered by accepted paths after square dilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForbiddenCells {
    cells: HashSet<GridCoord>,
}

impl ForbiddenCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize a path with the given half-width, dropping cells outside
    /// the map.
    pub fn insert_path(&mut self, path: &Path, half_width: u32, field: &HeightField) {
        let r = half_width as i32;
        for cell in path.cells() {
            for dz in -r..=r {
                for dx in -r..=r {
                    let neighbor = GridCoord::new(cell.x + dx, cell.z + dz);
                    if field.contains(neighbor) {
                        self.cells.insert(neighbor);
                    }
                }
            }
        }
    }

    pub fn contains(&self, cell: GridCoord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCoord> {
        self.cells.iter()
    }
}

/// Acceptance rules for carved paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRules {
    /// Paths to carve.
    pub num_paths: u32,
    /// Square dilation radius for the forbidden footprint.
    pub half_width: u32,
    /// Minimum number of cells in an accepted path.
    pub min_length: u32,
    /// Maximum shared cells with any previously accepted path.
    pub max_overlap: u32,
    /// Upper bound on entrance attempts.
    pub max_attempts: u32,
}

impl From<&PathConfig> for PathRules {
    fn from(config: &PathConfig) -> Self {
        Self {
            num_paths: config.num_paths,
            half_width: config.path_half_width,
            min_length: config.min_path_length,
            max_overlap: config.max_overlap,
            max_attempts: config.max_attempts,
        }
    }
}

impl Default for PathRules {
    fn default() -> Self {
        Self::from(&PathConfig::default())
    }
}

/// Result of a carving run.
///
/// Carving never fails outright. When the attempt budget or the supply of
/// entrances runs out first, fewer paths come back as [`Degraded`](Self::Degraded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Every requested path was carved.
    Complete(Vec<Path>),
    /// Fewer paths than requested, possibly none.
    Degraded {
        /// The paths that were accepted.
        paths: Vec<Path>,
        /// How many were asked for.
        requested: u32,
    },
}

impl CarveOutcome {
    /// Accepted paths in acceptance order.
    pub fn paths(&self) -> &[Path] {
        match self {
            Self::Complete(paths) | Self::Degraded { paths, .. } => paths,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Output of [`PathCarver::carve`].
#[derive(Clone, Debug)]
pub struct CarvedPaths {
    /// Accepted paths and whether the request was met.
    pub outcome: CarveOutcome,
    /// Dilated footprint of every accepted path.
    pub forbidden: ForbiddenCells,
}

/// Carves paths from the map ring to its center over a fixed height field.
pub struct PathCarver<'a> {
    field: &'a HeightField,
    rules: PathRules,
    rng: ChaCha8Rng,
}

impl<'a> PathCarver<'a> {
    /// Create a carver drawing from the world seed's path stream.
    pub fn new(field: &'a HeightField, rules: PathRules, world_seed: u64) -> Self {
        Self::with_rng(field, rules, stream_rng(world_seed, SeedStream::PathCarving))
    }

    /// Create a carver with an explicit RNG.
    pub fn with_rng(field: &'a HeightField, rules: PathRules, rng: ChaCha8Rng) -> Self {
        Self { field, rules, rng }
    }

    /// Run the attempt loop to completion.
    pub fn carve(mut self) -> CarvedPaths {
        let mut untried = self.field.boundary_cells();
        let mut paths: Vec<Path> = Vec::new();
        let mut forbidden = ForbiddenCells::new();
        let mut attempts = 0;

        while (paths.len() as u32) < self.rules.num_paths
            && attempts < self.rules.max_attempts
            && !untried.is_empty()
        {
            attempts += 1;
            let pick = self.rng.random_range(0..untried.len());
            let entrance = untried.swap_remove(pick);

            let Some(path) = self.walk(entrance) else {
                tracing::debug!(%entrance, "Walk did not reach the center");
                continue;
            };
            if (path.len() as u32) < self.rules.min_length {
                tracing::debug!(%entrance, len = path.len(), "Path too short");
                continue;
            }
            if let Some(worst) = paths.iter().map(|p| path.overlap(p)).max()
                && worst as u32 > self.rules.max_overlap
            {
                tracing::debug!(%entrance, overlap = worst, "Path overlaps an accepted path");
                continue;
            }

            forbidden.insert_path(&path, self.rules.half_width, self.field);
            tracing::debug!(%entrance, len = path.len(), "Accepted path");
            paths.push(path);
        }

        let outcome = if paths.len() as u32 >= self.rules.num_paths {
            CarveOutcome::Complete(paths)
        } else {
            tracing::warn!(
                accepted = paths.len(),
                requested = self.rules.num_paths,
                attempts,
                "Path carving produced fewer paths than requested"
            );
            CarveOutcome::Degraded {
                paths,
                requested: self.rules.num_paths,
            }
        };

        CarvedPaths { outcome, forbidden }
    }

    /// Greedy walk from `start` toward the center.
    ///
    /// Returns `None` if the step bound runs out first.
    fn walk(&mut self, start: GridCoord) -> Option<Path> {
        let target = self.field.center();
        let max_steps = self.field.width() as usize * self.field.depth() as usize;
        let mut cells = vec![start];
        let mut current = start;

        for _ in 0..max_steps {
            if current == target {
                break;
            }
            let here = self.field.get(current.x, current.z);
            let moves = toward(current, target);

            let best = moves
                .iter()
                .map(|m| self.field.get(m.x, m.z).abs_diff(here))
                .min()?;
            let flattest: Vec<GridCoord> = moves
                .into_iter()
                .filter(|m| self.field.get(m.x, m.z).abs_diff(here) == best)
                .collect();

            current = if flattest.len() > 1 {
                flattest[self.rng.random_range(0..flattest.len())]
            } else {
                flattest[0]
            };
            cells.push(current);
        }

        (current == target).then(|| Path::new(cells))
    }
}

/// The (at most two) axis moves from `from` that reduce Manhattan distance.
fn toward(from: GridCoord, target: GridCoord) -> Vec<GridCoord> {
    let mut moves = Vec::with_capacity(2);
    if from.x != target.x {
        moves.push(GridCoord::new(from.x + (target.x - from.x).signum(), from.z));
    }
    if from.z != target.z {
        moves.push(GridCoord::new(from.x, from.z + (target.z - from.z).signum()));
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(num_paths: u32) -> PathRules {
        PathRules {
            num_paths,
            ..PathRules::default()
        }
    }

    fn bumpy_field() -> HeightField {
        let (w, d) = (24, 24);
        let heights = (0..w * d).map(|i| 1 + (i * 7 % 5)).collect();
        HeightField::from_heights(w, d, 8, heights).unwrap()
    }

    #[test]
    fn test_toward_moves_reduce_distance() {
        let target = GridCoord::new(5, 5);
        let from = GridCoord::new(0, 9);
        let moves = toward(from, target);
        assert_eq!(moves.len(), 2);
        for m in moves {
            assert_eq!(m.manhattan(target), from.manhattan(target) - 1);
        }
        assert_eq!(toward(GridCoord::new(5, 0), target), vec![GridCoord::new(5, 1)]);
        assert!(toward(target, target).is_empty());
    }

    #[test]
    fn test_paths_satisfy_invariants() {
        let field = bumpy_field();
        let carved = PathCarver::new(&field, rules(4), 2024).carve();
        let paths = carved.outcome.paths();
        assert!(!paths.is_empty());

        for path in paths {
            assert!(path.len() >= 10, "Path too short: {}", path.len());
            assert!(field.is_boundary(path.start().unwrap()));
            assert_eq!(path.end(), Some(field.center()));
            assert!(path.is_connected(), "Path is not 4-connected");
        }
        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                assert!(a.overlap(b) <= 2, "Overlap {} exceeds tolerance", a.overlap(b));
            }
        }
    }

    #[test]
    fn test_forbidden_covers_dilated_paths() {
        let field = bumpy_field();
        let carved = PathCarver::new(&field, rules(2), 9).carve();
        for path in carved.outcome.paths() {
            for cell in path.cells() {
                for dz in -1..=1 {
                    for dx in -1..=1 {
                        let n = GridCoord::new(cell.x + dx, cell.z + dz);
                        if field.contains(n) {
                            assert!(carved.forbidden.contains(n), "{n} missing from footprint");
                        }
                    }
                }
            }
        }
        assert!(carved.forbidden.iter().all(|&c| field.contains(c)));
    }

    #[test]
    fn test_carving_is_deterministic() {
        let field = bumpy_field();
        let a = PathCarver::new(&field, rules(3), 55).carve();
        let b = PathCarver::new(&field, rules(3), 55).carve();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.forbidden, b.forbidden);
    }

    #[test]
    fn test_flat_ten_by_ten_single_path() {
        let field = HeightField::flat(10, 10, 4, 2);
        let carved = PathCarver::new(&field, rules(1), 7).carve();
        assert!(matches!(carved.outcome, CarveOutcome::Complete(_)));

        let path = &carved.outcome.paths()[0];
        assert!(path.len() >= 10);
        assert!(field.boundary_cells().contains(&path.start().unwrap()));
        assert_eq!(path.end(), Some(GridCoord::new(5, 5)));
        assert!(carved.forbidden.contains(GridCoord::new(5, 5)));
    }

    #[test]
    fn test_impossible_request_is_degraded() {
        let field = HeightField::flat(10, 10, 4, 2);
        let impossible = PathRules {
            num_paths: 2,
            min_length: 50,
            ..PathRules::default()
        };
        let carved = PathCarver::new(&field, impossible, 1).carve();
        assert_eq!(
            carved.outcome,
            CarveOutcome::Degraded {
                paths: Vec::new(),
                requested: 2
            }
        );
        assert!(carved.forbidden.is_empty());
    }

    #[test]
    fn test_zero_paths_is_complete() {
        let field = HeightField::flat(10, 10, 4, 2);
        let carved = PathCarver::new(&field, rules(0), 1).carve();
        assert_eq!(carved.outcome, CarveOutcome::Complete(Vec::new()));
    }

    #[test]
    fn test_walk_prefers_flat_steps() {
        // Walls at x >= 2 on the first row and on z == 1 except x == 1: from
        // (0, 0) to center (2, 2) the walk must go right, then through the gap.
        let heights = vec![
            1, 1, 5, 5, 5, //
            5, 1, 5, 5, 5, //
            1, 1, 1, 1, 1, //
            1, 1, 1, 1, 1, //
            1, 1, 1, 1, 1,
        ];
        let field = HeightField::from_heights(5, 5, 8, heights).unwrap();
        let mut carver = PathCarver::new(&field, PathRules::default(), 3);
        let path = carver.walk(GridCoord::new(0, 0)).unwrap();
        assert_eq!(path.cells()[1], GridCoord::new(1, 0));
        assert_eq!(path.cells()[2], GridCoord::new(1, 1));
        assert_eq!(path.cells()[3], GridCoord::new(1, 2));
        assert_eq!(path.end(), Some(GridCoord::new(2, 2)));
    }

    #[test]
    fn test_overlap_counts_shared_cells() {
        let a = Path::new(vec![GridCoord::new(0, 0), GridCoord::new(1, 0), GridCoord::new(2, 0)]);
        let b = Path::new(vec![GridCoord::new(1, 1), GridCoord::new(1, 0), GridCoord::new(2, 0)]);
        assert_eq!(a.overlap(&b), 2);
        assert_eq!(b.overlap(&a), 2);
    }
}
