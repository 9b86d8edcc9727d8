//! Grid-based spatial index for neighbor search.

use std::collections::HashMap;

/// Uniform grid of cubic cells holding atom indices.
///
/// Queries scan the 27 cells around the query point, so the cell size
/// must be at least the largest query radius.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    inv_cell_size: f64,
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid; non-positive cell sizes fall back to 1 Å.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Creates a grid holding every position, indexed by slice position.
    pub fn from_positions(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.iter().enumerate() {
            grid.insert(idx, *pos);
        }
        grid
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_coords(&self, pos: [f64; 3]) -> (i32, i32, i32) {
        (
            (pos[0] * self.inv_cell_size).floor() as i32,
            (pos[1] * self.inv_cell_size).floor() as i32,
            (pos[2] * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Indices whose distance to `query` lies in `[min_dist, max_dist]`, sorted.
    ///
    /// `max_dist` is clamped to the cell size.
    pub fn neighbors(
        &self,
        query: [f64; 3],
        positions: &[[f64; 3]],
        min_dist: f64,
        max_dist: f64,
    ) -> Vec<usize> {
        let max_dist = max_dist.min(self.cell_size);
        let (min_sq, max_sq) = (min_dist * min_dist, max_dist * max_dist);
        let (cx, cy, cz) = self.cell_coords(query);

        let mut results = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in indices {
                        let pos = positions[idx];
                        let dist_sq = (pos[0] - query[0]).powi(2)
                            + (pos[1] - query[1]).powi(2)
                            + (pos[2] - query[2]).powi(2);
                        if dist_sq >= min_sq && dist_sq <= max_sq {
                            results.push(idx);
                        }
                    }
                }
            }
        }
        results.sort_unstable();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid() {
        let grid = SpatialGrid::new(2.0);
        assert!(grid.neighbors([0.0; 3], &[], 0.0, 2.0).is_empty());
    }

    #[test]
    fn distance_window() {
        let positions = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.5, 0.0],
            [5.0, 0.0, 0.0],
            [0.0, 0.0, 1.9],
            [0.0, 0.0, 2.1],
        ];
        let grid = SpatialGrid::from_positions(&positions, 2.0);
        assert_eq!(grid.neighbors([0.0; 3], &positions, 0.001, 2.0), vec![1, 2, 4]);
        assert_eq!(grid.neighbors([0.0; 3], &positions, 0.0, 2.0), vec![0, 1, 2, 4]);
    }

    #[test]
    fn cell_boundary_handling() {
        let positions = vec![[1.99, 0.0, 0.0], [2.01, 0.0, 0.0]];
        let grid = SpatialGrid::from_positions(&positions, 2.0);
        assert_eq!(grid.neighbors([0.0; 3], &positions, 0.0, 2.0), vec![0]);
        assert_eq!(grid.neighbors([4.0, 0.0, 0.0], &positions, 0.0, 2.0), vec![1]);
    }

    #[test]
    fn radius_is_clamped_to_cell_size() {
        let positions = vec![[3.5, 0.0, 0.0]];
        let grid = SpatialGrid::from_positions(&positions, 2.0);
        assert!(grid.neighbors([0.0; 3], &positions, 0.0, 4.0).is_empty());
        assert_eq!(grid.cell_size(), 2.0);
        assert_eq!(SpatialGrid::new(-1.0).cell_size(), 1.0);
    }
}
