use std::{fmt, str::FromStr};

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{cell::CellState, error::ConfigError, pos::Position};

/// A row-major snapshot of cell states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<CellState>,
}

/// Unchecked wire form of [`Grid`], validated through [`Grid::with_cells`].
#[derive(Deserialize)]
struct GridData {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl TryFrom<GridData> for Grid {
    type Error = ConfigError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        Self::with_cells(data.rows, data.columns, data.cells)
    }
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![CellState::default(); rows * columns],
        }
    }

    /// Every cell is alive with probability `density`.
    pub fn new_random<R>(rows: usize, columns: usize, density: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..rows * columns)
            .map(|_| CellState::from(rng.random_bool(density)))
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn with_cells(rows: usize, columns: usize, cells: Vec<CellState>) -> Result<Self, ConfigError> {
        if cells.len() != rows * columns {
            return Err(ConfigError::CellCountMismatch {
                expected: rows * columns,
                actual: cells.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Builds a grid from nested rows. All rows must be the same length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ConfigError>
    where
        R: AsRef<[bool]>,
    {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());

        if let Some(bad_row) = rows.iter().find(|row| row.as_ref().len() != columns) {
            return Err(ConfigError::DimensionMismatch {
                expected: (rows.len(), columns),
                actual: (rows.len(), bad_row.as_ref().len()),
            });
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied().map(CellState::from))
            .collect();

        Ok(Self {
            rows: rows.len(),
            columns,
            cells,
        })
    }

    /// The `n`-th grid of the given size when every cell is read as one bit of `n`,
    /// cell index 0 being the least significant bit.
    pub fn from_index_bits(rows: usize, columns: usize, n: u64) -> Self {
        let cells = (0..rows * columns)
            .map(|index| CellState::from(index < 64 && (n >> index) & 1 == 1))
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    pub fn cell_mut<P>(&mut self, pos: P) -> Option<&mut CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get_mut(index)
    }

    pub fn is_alive<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        self.cell(pos).is_some_and(|state| state.is_alive())
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &CellState)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), cell))
    }

    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        let start = row.checked_mul(self.columns)?;
        self.cells.get(start..start + self.columns).filter(|_| row < self.rows)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        // chunks() panics on a zero chunk size.
        self.cells.chunks(self.columns.max(1))
    }

    pub fn count_cells(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    pub fn alive_positions(&self) -> Vec<Position> {
        self.enumerate_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect_vec()
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    pub fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { row, col } = pos.into();

        if row >= self.rows {
            return None;
        }

        if col >= self.columns {
            return None;
        }

        Some(row * self.columns + col)
    }

    pub fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.columns,
            col: index % self.columns,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line = row
                .iter()
                .map(|cell| if cell.is_alive() { '1' } else { '0' })
                .join(" ");
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ConfigError;

    /// Parses one row per non-empty line. `1`, `O`, `#` and `*` are alive; `0` and `.` are dead;
    /// whitespace inside a line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| matches!(c, '1' | 'O' | 'o' | '#' | '*'))
                    .collect_vec()
            })
            .collect_vec();

        Self::from_rows(&rows)
    }
}
