use thiserror::Error;

use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {rows}x{columns}.")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("Expected a {}x{} grid, got {}x{}.", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Expected {expected} cells, got {actual}.")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("Pattern {pattern} doesn't fit in a {}x{} grid.", .grid.0, .grid.1)]
    PatternTooLarge {
        pattern: &'static str,
        grid: (usize, usize),
    },

    #[error("Refusing to enumerate every {cells}-cell grid, the limit is {max} cells.")]
    ExhaustiveTooLarge { cells: usize, max: usize },
}

/// The engine's unloaded grid disagreed with the reference oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Scenario {scenario:?} diverged at generation {generation}.\nInitial:\n{initial}\nExpected:\n{expected}\nObserved:\n{observed}"
)]
pub struct Mismatch {
    pub scenario: String,

    /// One-based generation index, matching the number of evolve ticks applied.
    pub generation: usize,

    pub initial: Grid,
    pub expected: Grid,
    pub observed: Grid,
}
