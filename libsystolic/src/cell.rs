use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl From<CellState> for bool {
    fn from(state: CellState) -> Self {
        state.is_alive()
    }
}

impl Not for CellState {
    type Output = CellState;

    fn not(self) -> Self::Output {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

/// The two mode lines, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Control {
    /// Apply the neighbor-count rule.
    pub evolve: bool,

    /// Take the chain predecessor's bit. Wins over `evolve` when both are set.
    pub shift: bool,
}

impl Control {
    pub const HOLD: Control = Control {
        evolve: false,
        shift: false,
    };

    pub const EVOLVE: Control = Control {
        evolve: true,
        shift: false,
    };

    pub const SHIFT: Control = Control {
        evolve: false,
        shift: true,
    };

    pub fn new(evolve: bool, shift: bool) -> Self {
        Self { evolve, shift }
    }
}

/// A single-bit processing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub state: CellState,
}

impl Cell {
    pub fn new(state: CellState) -> Self {
        Self { state }
    }

    /// Computes the state this cell latches at the end of the tick.
    ///
    /// `shift_in` is the predecessor's pre-tick state (or the external data line for the chain
    /// entry), `alive_neighbors` is counted over pre-tick neighbor states. The cell itself is not
    /// mutated here; the engine commits all next states at once.
    pub fn next_state(
        &self,
        control: Control,
        rule: &Rule,
        shift_in: CellState,
        alive_neighbors: usize,
    ) -> CellState {
        let mut next = self.state;

        if control.evolve {
            next = rule.apply(self.state, alive_neighbors);
        }

        // Assigned last so a simultaneous shift overrides the evolve result.
        if control.shift {
            next = shift_in;
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: CellState, control: Control, shift_in: CellState, neighbors: usize) -> CellState {
        Cell::new(state).next_state(control, &Rule::default(), shift_in, neighbors)
    }

    #[test]
    fn hold_keeps_state() {
        for state in [CellState::Alive, CellState::Dead] {
            for neighbors in 0..=8 {
                assert_eq!(step(state, Control::HOLD, !state, neighbors), state);
            }
        }
    }

    #[test]
    fn evolve_applies_rule() {
        assert_eq!(step(CellState::Dead, Control::EVOLVE, CellState::Dead, 3), CellState::Alive);
        assert_eq!(step(CellState::Dead, Control::EVOLVE, CellState::Dead, 2), CellState::Dead);
        assert_eq!(step(CellState::Alive, Control::EVOLVE, CellState::Dead, 2), CellState::Alive);
        assert_eq!(step(CellState::Alive, Control::EVOLVE, CellState::Dead, 1), CellState::Dead);
        assert_eq!(step(CellState::Alive, Control::EVOLVE, CellState::Dead, 4), CellState::Dead);
    }

    #[test]
    fn shift_ignores_neighbors() {
        for neighbors in 0..=8 {
            assert_eq!(step(CellState::Dead, Control::SHIFT, CellState::Alive, neighbors), CellState::Alive);
            assert_eq!(step(CellState::Alive, Control::SHIFT, CellState::Dead, neighbors), CellState::Dead);
        }
    }

    #[test]
    fn shift_overrides_evolve() {
        let both = Control::new(true, true);

        // Dead with three neighbors would be born, shift_in says dead.
        assert_eq!(step(CellState::Dead, both, CellState::Dead, 3), CellState::Dead);

        // Alive with no neighbors would die, shift_in says alive.
        assert_eq!(step(CellState::Alive, both, CellState::Alive, 0), CellState::Alive);
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(CellState::from(true), CellState::Alive);
        assert!(!bool::from(CellState::Dead));
        assert_eq!(!CellState::Dead, CellState::Alive);
    }
}
