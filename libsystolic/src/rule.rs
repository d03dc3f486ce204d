use serde::{Deserialize, Serialize};

use crate::cell::CellState;

/// Birth/survival neighbor counts. The default is Conway's B3/S23.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    /// The state a cell moves to under this rule given its alive neighbor count.
    pub fn apply(&self, state: CellState, alive_neighbors: usize) -> CellState {
        let alive = match state {
            CellState::Alive => self.survive.contains(&alive_neighbors),
            CellState::Dead => self.birth.contains(&alive_neighbors),
        };

        CellState::from(alive)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}
