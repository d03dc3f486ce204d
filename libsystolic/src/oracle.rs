//! Direct next-generation computation over a grid snapshot. Shares nothing with the engine but
//! the [`Rule`], so the two can be checked against each other.

use crate::{cell::CellState, grid::Grid, pos::Position, rule::Rule};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceOracle {
    pub rule: Rule,
}

impl ReferenceOracle {
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    pub fn next(&self, grid: &Grid) -> Grid {
        let next_cells = grid
            .enumerate_cells()
            .map(|(pos, cell)| self.next_cell(grid, pos, *cell))
            .collect();

        Grid {
            rows: grid.rows,
            columns: grid.columns,
            cells: next_cells,
        }
    }

    /// Applies [`ReferenceOracle::next`] `generations` times.
    pub fn nth(&self, grid: &Grid, generations: usize) -> Grid {
        (0..generations).fold(grid.clone(), |current, _| self.next(&current))
    }

    fn next_cell(&self, grid: &Grid, pos: Position, cell: CellState) -> CellState {
        let alive_neighbor_count = Self::alive_neighbors(grid, pos);
        self.rule.apply(cell, alive_neighbor_count)
    }

    fn alive_neighbors(grid: &Grid, pos: Position) -> usize {
        let mut count = 0;

        for d_row in -1..=1isize {
            for d_col in -1..=1isize {
                if d_row == 0 && d_col == 0 {
                    continue;
                }

                let row = pos.row as isize + d_row;
                let col = pos.col as isize + d_col;

                if row < 0 || col < 0 || row >= grid.rows as isize || col >= grid.columns as isize {
                    continue;
                }

                if grid.is_alive((row as usize, col as usize)) {
                    count += 1;
                }
            }
        }

        count
    }
}

/// Next generation under Conway's rule.
pub fn next(grid: &Grid) -> Grid {
    ReferenceOracle::default().next(grid)
}
