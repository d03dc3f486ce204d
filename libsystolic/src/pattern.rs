use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{cell::CellState, error::ConfigError, grid::Grid, pos::Position};

/// Well-known patterns, used as fixtures with known behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pattern {
    Block,
    Beehive,
    Blinker,
    Toad,
    Beacon,
    Glider,
}

impl Pattern {
    pub fn all() -> Vec<Pattern> {
        Pattern::iter().collect()
    }

    /// Alive cells as `(row, col)` offsets from the pattern's top-left corner.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Beehive => &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Pattern::Beacon => &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Oscillation period, 1 for still lifes. `None` for patterns that travel.
    pub fn period(self) -> Option<usize> {
        match self {
            Pattern::Block | Pattern::Beehive => Some(1),
            Pattern::Blinker | Pattern::Toad | Pattern::Beacon => Some(2),
            Pattern::Glider => None,
        }
    }

    /// `(rows, columns)` of the bounding box.
    pub fn extent(self) -> (usize, usize) {
        let cells = self.cells();
        let rows = cells.iter().map(|(row, _)| row + 1).max().unwrap_or(0);
        let columns = cells.iter().map(|(_, col)| col + 1).max().unwrap_or(0);
        (rows, columns)
    }

    /// Writes the pattern into `grid` with its top-left corner at `origin`.
    pub fn stamp(self, grid: &mut Grid, origin: Position) -> Result<(), ConfigError> {
        let (rows, columns) = self.extent();

        if origin.row + rows > grid.rows || origin.col + columns > grid.columns {
            return Err(ConfigError::PatternTooLarge {
                pattern: self.into(),
                grid: grid.dimensions(),
            });
        }

        for &(row, col) in self.cells() {
            if let Some(cell) = grid.cell_mut((origin.row + row, origin.col + col)) {
                *cell = CellState::Alive;
            }
        }

        Ok(())
    }

    /// A fresh grid with the pattern centered, rounding toward the top-left.
    pub fn centered(self, rows: usize, columns: usize) -> Result<Grid, ConfigError> {
        let (pattern_rows, pattern_columns) = self.extent();
        let mut grid = Grid::new(rows, columns);

        let origin = Position {
            row: rows.saturating_sub(pattern_rows) / 2,
            col: columns.saturating_sub(pattern_columns) / 2,
        };

        self.stamp(&mut grid, origin)?;
        Ok(grid)
    }
}
