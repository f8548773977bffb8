//! # grid_voronoi
//!
//! A grid-based weighted Voronoi partitioning system. Runs a multi-source
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) expansion
//! from every weighted seed cell simultaneously and labels each passable cell
//! with the identifier of the seed closest to it under a shortest-path metric
//! that respects obstacles. Entering a seed cell costs that seed's weight, so
//! heavy seeds are expensive to path through; entering any other passable
//! cell costs one.
mod expansion;

pub mod error;
pub mod protocol;

use crate::error::GridError;
use crate::expansion::multi_source_expansion;
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

pub use crate::expansion::SeedId;

/// Cell value of an impassable obstacle; copied through unchanged into the
/// label grid.
pub const BLOCKED: i32 = -1;
/// Label of a passable cell no seed can reach. Coincides with the input value
/// of an empty cell, which is distinct from every seed identifier.
pub const UNREACHED: i32 = 0;

const STEP_COST: i32 = 1;

/// A weighted source cell found by the row-major scan. Identifiers are
/// 1-based and sequential in first-appearance order, independent of any
/// container's iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed {
    pub id: SeedId,
    pub position: Point,
    pub weight: i32,
}

/// [VoronoiGrid] maintains the list of [Seed] cells scanned from the raw
/// cell values in the [SimpleGrid], where `-1` marks an obstacle, `0` an
/// empty cell and a positive value a seed with that weight. Implements
/// [Grid] by building on [SimpleGrid]; mutating a cell through [Grid::set]
/// flags the seed list as dirty.
#[derive(Clone, Debug)]
pub struct VoronoiGrid {
    pub grid: SimpleGrid<i32>,
    pub seeds: Vec<Seed>,
    pub seeds_dirty: bool,
}

impl Default for VoronoiGrid {
    fn default() -> VoronoiGrid {
        VoronoiGrid {
            grid: SimpleGrid::default(),
            seeds: Vec::new(),
            seeds_dirty: false,
        }
    }
}

impl VoronoiGrid {
    /// Builds a grid from a square `size` x `size` matrix of rows, the shape
    /// the JSON interface delivers. Fails with [GridError::ShapeMismatch] if
    /// the matrix is not square or disagrees with `size`, and with
    /// [GridError::InvalidCellValue] if any cell is below `-1`. Both checks
    /// run before any expansion could start.
    pub fn from_matrix(matrix: &[Vec<i32>], size: usize) -> Result<VoronoiGrid, GridError> {
        if matrix.len() != size {
            return Err(GridError::ShapeMismatch {
                declared: size,
                rows: matrix.len(),
                cols: matrix.first().map_or(0, Vec::len),
            });
        }
        for row in matrix {
            if row.len() != size {
                return Err(GridError::ShapeMismatch {
                    declared: size,
                    rows: matrix.len(),
                    cols: row.len(),
                });
            }
        }
        let mut grid = SimpleGrid::new(size, size, UNREACHED);
        for (y, x) in (0..size).cartesian_product(0..size) {
            let value = matrix[y][x];
            if value < BLOCKED {
                return Err(GridError::InvalidCellValue {
                    x: x as i32,
                    y: y as i32,
                    value,
                });
            }
            grid.set(x, y, value);
        }
        let mut voronoi_grid = VoronoiGrid {
            grid,
            seeds: Vec::new(),
            seeds_dirty: false,
        };
        voronoi_grid.generate_seeds();
        Ok(voronoi_grid)
    }

    /// Rescans the grid row-major and assigns each positive-valued cell a
    /// fresh sequential identifier starting at 1.
    pub fn generate_seeds(&mut self) {
        info!("Scanning grid for seeds");
        self.seeds.clear();
        self.seeds_dirty = false;
        for (y, x) in (0..self.height()).cartesian_product(0..self.width()) {
            let weight = self.grid.get(x, y);
            if weight > 0 {
                let id = self.seeds.len() as SeedId + 1;
                self.seeds.push(Seed {
                    id,
                    position: Point::new(x as i32, y as i32),
                    weight,
                });
            }
        }
    }

    /// Regenerates the seed list if it is marked as dirty.
    pub fn update(&mut self) {
        if self.seeds_dirty {
            info!("Seeds are dirty: rescanning grid");
            self.generate_seeds();
        }
    }

    /// Computes the label grid: every passable cell reachable from some seed
    /// holds the identifier of its closest seed, obstacle cells stay
    /// [BLOCKED] and cut-off cells stay [UNREACHED]. Ties on accumulated
    /// distance go to the smaller identifier, so the output is fully
    /// deterministic. Assumes the seed list is current, see
    /// [update](Self::update).
    pub fn partition(&self) -> SimpleGrid<i32> {
        debug_assert!(!self.seeds_dirty);
        let mut labels = SimpleGrid::new(self.width(), self.height(), UNREACHED);
        for (y, x) in (0..self.height()).cartesian_product(0..self.width()) {
            if self.grid.get(x, y) == BLOCKED {
                labels.set(x, y, BLOCKED);
            }
        }
        if self.seeds.is_empty() {
            warn!("No seeds present: every passable cell is unreached");
            return labels;
        }
        info!("Expanding {} seeds simultaneously", self.seeds.len());
        let sources = self.seeds.iter().map(|seed| (seed.position, seed.id));
        let visited = multi_source_expansion(sources, |node| self.neighborhood_costs(node));
        for (point, &(seed, _cost)) in visited.iter() {
            labels.set_point(*point, seed as i32);
        }
        labels
    }

    /// The passable 4-neighbourhood of a cell together with entry costs.
    fn neighborhood_costs(&self, node: &Point) -> Vec<(Point, i32)> {
        [
            Point::new(node.x, node.y - 1),
            Point::new(node.x - 1, node.y),
            Point::new(node.x + 1, node.y),
            Point::new(node.x, node.y + 1),
        ]
        .into_iter()
        .filter(|&p| self.can_move_to(p))
        .map(|p| (p, self.entry_cost(p)))
        .collect::<Vec<(Point, i32)>>()
    }

    /// Seeds act as a cost field: stepping onto one costs its weight.
    fn entry_cost(&self, pos: Point) -> i32 {
        let value = self.grid.get_point(pos);
        if value > 0 {
            value
        } else {
            STEP_COST
        }
    }

    fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.grid.get(pos.x as usize, pos.y as usize) != BLOCKED
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

impl fmt::Display for VoronoiGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.grid.height {
            let values = (0..self.grid.width)
                .map(|x| self.grid.get(x, y))
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        writeln!(f, "\nSeeds:")?;
        for seed in &self.seeds {
            writeln!(f, "{}: {} (weight {})", seed.id, seed.position, seed.weight)?;
        }
        Ok(())
    }
}

impl Grid<i32> for VoronoiGrid {
    fn new(width: usize, height: usize, default_value: i32) -> Self {
        let mut base_grid = VoronoiGrid {
            grid: SimpleGrid::new(width, height, default_value),
            seeds: Vec::new(),
            seeds_dirty: false,
        };
        base_grid.generate_seeds();
        base_grid
    }
    fn get(&self, x: usize, y: usize) -> i32 {
        self.grid.get(x, y)
    }
    /// Updates a cell value. Flags the seed list as dirty if a seed may have
    /// been added, removed or reweighted by the change.
    fn set(&mut self, x: usize, y: usize, value: i32) {
        debug_assert!(value >= BLOCKED);
        if self.grid.get(x, y) > 0 || value > 0 {
            self.seeds_dirty = true;
        }
        self.grid.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_scan_order() {
        let matrix = vec![vec![0, 0, 7], vec![3, -1, 0], vec![0, 5, 0]];
        let grid = VoronoiGrid::from_matrix(&matrix, 3).unwrap();
        let scanned = grid
            .seeds
            .iter()
            .map(|s| (s.id, s.weight))
            .collect::<Vec<(SeedId, i32)>>();
        assert_eq!(scanned, vec![(1, 7), (2, 3), (3, 5)]);
    }

    #[test]
    fn test_set_marks_seeds_dirty() {
        let mut grid = VoronoiGrid::new(3, 3, 0);
        assert!(grid.seeds.is_empty());
        grid.set(1, 1, 4);
        assert!(grid.seeds_dirty);
        grid.update();
        assert_eq!(grid.seeds.len(), 1);
        assert_eq!(grid.seeds[0].position, Point::new(1, 1));
        assert_eq!(grid.seeds[0].weight, 4);
    }

    #[test]
    #[should_panic(expected = "seeds_dirty")]
    fn test_partition_rejects_stale_seeds() {
        let mut grid = VoronoiGrid::new(3, 3, 0);
        grid.set(1, 1, 4);
        // partition before update(): the stale seed list trips the guard
        grid.partition();
    }
}
