//! A clocked, bit-serial Game of Life array. Cells either all evolve together or shift as one
//! long chain, which is how grids are loaded and read back.

pub use cell::{Cell, CellState, Control};
pub use engine::SystolicEngine;
pub use error::{ConfigError, Mismatch};
pub use grid::Grid;
pub use oracle::ReferenceOracle;
pub use pattern::Pattern;
pub use pos::Position;
pub use rule::Rule;
pub use topology::GridTopology;

pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod pattern;
pub mod pos;
pub mod rule;
pub mod snapshot;
pub mod stimulus;
pub mod topology;
pub mod verify;
