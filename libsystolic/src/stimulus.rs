//! Initial grid generators for verification runs.

use itertools::Itertools;
use rand::{Rng, seq::IndexedRandom};

use crate::{cell::CellState, error::ConfigError, grid::Grid, pos::Position};

/// Largest grid, in cells, that [`exhaustive`] will enumerate.
pub const MAX_EXHAUSTIVE_CELLS: usize = 24;

/// Row densities and their weights for [`weighted_rows`]. The extremes are over-weighted so
/// empty and full rows, and the dense neighborhoods next to them, show up often.
const ROW_DENSITIES: [(f64, u32); 7] = [
    (0.0, 3),
    (0.125, 2),
    (0.25, 2),
    (0.5, 3),
    (0.75, 2),
    (0.875, 2),
    (1.0, 3),
];

/// Uniform random grid, every cell alive with probability `density`.
pub fn random<R>(rows: usize, columns: usize, density: f64, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    Grid::new_random(rows, columns, density, rng)
}

/// Random grid where every row draws its own density, so one grid mixes sparse and crowded
/// neighborhoods and exercises the whole 0..=8 neighbor count range.
pub fn weighted_rows<R>(rows: usize, columns: usize, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let mut cells = Vec::with_capacity(rows * columns);

    for _ in 0..rows {
        let density = ROW_DENSITIES
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(density, _)| *density)
            .unwrap_or(0.5);

        for _ in 0..columns {
            cells.push(CellState::from(rng.random_bool(density)));
        }
    }

    Grid {
        rows,
        columns,
        cells,
    }
}

/// Every one of the `2^(rows*columns)` grids of the given size.
pub fn exhaustive(rows: usize, columns: usize) -> Result<impl Iterator<Item = Grid>, ConfigError> {
    let cells = rows * columns;

    if cells > MAX_EXHAUSTIVE_CELLS {
        return Err(ConfigError::ExhaustiveTooLarge {
            cells,
            max: MAX_EXHAUSTIVE_CELLS,
        });
    }

    Ok((0..1u64 << cells).map(move |n| Grid::from_index_bits(rows, columns, n)))
}

/// Hand-picked boundary cases: empty, full, checkerboards, a lone cell on every corner and edge
/// midpoint, and a hollow frame.
pub fn edge_cases(rows: usize, columns: usize) -> Vec<(String, Grid)> {
    let mut cases = Vec::new();

    cases.push(("all_dead".to_owned(), Grid::new(rows, columns)));

    let mut full = Grid::new(rows, columns);
    full.cells.fill(CellState::Alive);
    cases.push(("all_alive".to_owned(), full));

    for parity in 0..2 {
        let mut checker = Grid::new(rows, columns);
        for (row, col) in (0..rows).cartesian_product(0..columns) {
            if (row + col) % 2 == parity {
                if let Some(cell) = checker.cell_mut((row, col)) {
                    *cell = CellState::Alive;
                }
            }
        }
        cases.push((format!("checkerboard_{parity}"), checker));
    }

    let last_row = rows.saturating_sub(1);
    let last_col = columns.saturating_sub(1);
    let lone_cells = [
        ("corner_nw", (0, 0)),
        ("corner_ne", (0, last_col)),
        ("corner_sw", (last_row, 0)),
        ("corner_se", (last_row, last_col)),
        ("edge_n", (0, columns / 2)),
        ("edge_s", (last_row, columns / 2)),
        ("edge_w", (rows / 2, 0)),
        ("edge_e", (rows / 2, last_col)),
    ];

    for (name, pos) in lone_cells {
        let mut grid = Grid::new(rows, columns);
        if let Some(cell) = grid.cell_mut(Position::from(pos)) {
            *cell = CellState::Alive;
        }
        cases.push((format!("lone_{name}"), grid));
    }

    let mut frame = Grid::new(rows, columns);
    for (row, col) in (0..rows).cartesian_product(0..columns) {
        if row == 0 || col == 0 || row == last_row || col == last_col {
            if let Some(cell) = frame.cell_mut((row, col)) {
                *cell = CellState::Alive;
            }
        }
    }
    cases.push(("frame".to_owned(), frame));

    cases
}
