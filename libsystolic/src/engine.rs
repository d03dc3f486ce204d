use log::{debug, trace};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    cell::{Cell, CellState, Control},
    error::ConfigError,
    grid::Grid,
    rule::Rule,
    topology::GridTopology,
};

/// Grids with at least this many cells compute their next states on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64 * 64;

/// A clocked array of single-bit cells driven by the `evolve` and `shift` lines.
///
/// Only [`SystolicEngine::tick`] mutates cell state. Every tick reads the previous states into a
/// scratch buffer and commits the whole buffer at once, so no cell ever observes another cell's
/// state from the same tick.
#[derive(Debug, Clone)]
pub struct SystolicEngine {
    topology: GridTopology,
    rule: Rule,
    cells: Vec<Cell>,
    next: Vec<CellState>,
    parallel_threshold: usize,
    cycles: u64,
}

impl SystolicEngine {
    pub fn new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        let topology = GridTopology::new(rows, columns)?;
        let len = topology.len();

        Ok(Self {
            topology,
            rule: Rule::default(),
            cells: vec![Cell::default(); len],
            next: vec![CellState::default(); len],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cycles: 0,
        })
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn rows(&self) -> usize {
        self.topology.rows()
    }

    pub fn columns(&self) -> usize {
        self.topology.columns()
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Ticks applied since construction.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// The data-out line: the exit cell's current state.
    pub fn output(&self) -> bool {
        self.cells[self.topology.exit()].state.is_alive()
    }

    /// Advances every cell by one synchronous step.
    ///
    /// `shift_in` drives the chain entry and is only sampled when `shift` is set. Returns the
    /// exit cell's state from before this tick.
    pub fn tick(&mut self, evolve: bool, shift: bool, shift_in: bool) -> bool {
        let control = Control::new(evolve, shift);
        let output = self.output();

        let shift_in = CellState::from(shift_in);
        let topology = &self.topology;
        let rule = &self.rule;
        let cells = &self.cells;

        let compute_next = |index: usize| {
            let cell = &cells[index];

            let predecessor = match topology.chain_predecessor(index) {
                Some(predecessor) => cells[predecessor].state,
                None => shift_in,
            };

            // The count is irrelevant unless the rule is applied.
            let alive_neighbors = if control.evolve && !control.shift {
                topology
                    .wired_neighbors(index)
                    .filter(|neighbor| cells[*neighbor].state.is_alive())
                    .count()
            } else {
                0
            };

            cell.next_state(control, rule, predecessor, alive_neighbors)
        };

        if cells.len() >= self.parallel_threshold {
            self.next
                .par_iter_mut()
                .enumerate()
                .for_each(|(index, state)| *state = compute_next(index));
        } else {
            self.next
                .iter_mut()
                .enumerate()
                .for_each(|(index, state)| *state = compute_next(index));
        }

        for (cell, state) in self.cells.iter_mut().zip(self.next.iter()) {
            cell.state = *state;
        }

        self.cycles += 1;
        trace!(
            "cycle {}: evolve={evolve} shift={shift} in={} out={output}",
            self.cycles,
            shift_in.is_alive()
        );

        output
    }

    /// One stall cycle with both control lines low.
    pub fn hold(&mut self) {
        self.tick(false, false, false);
    }

    /// Idles for `cycles` stall cycles, like a bench waiting out reset.
    pub fn reset(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.hold();
        }
    }

    /// Serially shifts `initial` into the array, followed by one settling cycle.
    ///
    /// The bit destined for the exit cell goes in first, so once the chain is full every cell
    /// holds the value at its own position.
    pub fn load_grid(&mut self, initial: &Grid) -> Result<(), ConfigError> {
        let expected = self.topology.dimensions();

        if initial.dimensions() != expected || initial.len() != self.topology.len() {
            return Err(ConfigError::DimensionMismatch {
                expected,
                actual: initial.dimensions(),
            });
        }

        for state in initial.cells.iter().rev() {
            self.tick(false, true, state.is_alive());
        }

        self.hold();
        debug!(
            "Loaded {}x{} grid ({} alive)",
            expected.0,
            expected.1,
            initial.count_cells(CellState::Alive)
        );

        Ok(())
    }

    pub fn advance_one_generation(&mut self) {
        self.tick(true, false, false);
    }

    /// Shifts the whole array out through the exit cell while feeding every bit back into the
    /// entry, so the stored configuration is unchanged afterwards.
    pub fn unload_grid(&mut self) -> Grid {
        let len = self.topology.len();
        let mut cells = vec![CellState::Dead; len];

        // Exit cell comes out first.
        for slot in cells.iter_mut().rev() {
            let feedback = self.output();
            *slot = CellState::from(self.tick(false, true, feedback));
        }

        let grid = Grid {
            rows: self.rows(),
            columns: self.columns(),
            cells,
        };

        debug!(
            "Unloaded {}x{} grid ({} alive)",
            grid.rows,
            grid.columns,
            grid.count_cells(CellState::Alive)
        );

        grid
    }
}
