//! Property tests for the systolic engine, checked against the reference oracle where
//! evolution is involved.

use libsystolic::{CellState, Grid, Pattern, Position, SystolicEngine, oracle};
use proptest::prelude::*;

fn grid_strategy(max_side: usize) -> impl Strategy<Value = Grid> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(any::<bool>(), rows * columns).prop_map(move |bits| Grid {
            rows,
            columns,
            cells: bits.into_iter().map(CellState::from).collect(),
        })
    })
}

fn loaded(grid: &Grid) -> SystolicEngine {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine = SystolicEngine::new(grid.rows, grid.columns).unwrap();
    engine.load_grid(grid).unwrap();
    engine
}

// =============================================================================
// Serial I/O
// =============================================================================

proptest! {
    #[test]
    fn prop_load_unload_round_trip(grid in grid_strategy(8)) {
        let mut engine = loaded(&grid);
        prop_assert_eq!(engine.unload_grid(), grid);
    }

    /// Unloading twice in a row sees the same grid, the closed loop puts every bit back.
    #[test]
    fn prop_unload_is_non_destructive(grid in grid_strategy(8)) {
        let mut engine = loaded(&grid);
        let first = engine.unload_grid();
        prop_assert_eq!(engine.unload_grid(), first);
    }

    /// The bit observed on shift tick `k` is the cell at chain index `N - k`.
    #[test]
    fn prop_unload_stream_order(grid in grid_strategy(6)) {
        let mut engine = loaded(&grid);
        let len = grid.len();

        for k in 1..=len {
            let bit = engine.output();
            prop_assert_eq!(engine.tick(false, true, bit), grid.cells[len - k].is_alive());
        }
    }

    #[test]
    fn prop_shift_priority(grid in grid_strategy(8), bit: bool) {
        let mut engine = loaded(&grid);
        engine.tick(true, true, bit);

        // Every cell took its predecessor's bit; the evolve rule played no part.
        let mut expected = grid.cells.clone();
        expected.rotate_right(1);
        expected[0] = CellState::from(bit);

        prop_assert_eq!(engine.unload_grid().cells, expected);
    }
}

// =============================================================================
// Evolution
// =============================================================================

proptest! {
    #[test]
    fn prop_oracle_equivalence(grid in grid_strategy(8)) {
        let mut engine = loaded(&grid);
        engine.advance_one_generation();
        prop_assert_eq!(engine.unload_grid(), oracle::next(&grid));
    }

    #[test]
    fn prop_oracle_equivalence_over_generations(grid in grid_strategy(8)) {
        let mut engine = loaded(&grid);
        let mut expected = grid;

        for generation in 1..=8 {
            engine.advance_one_generation();
            expected = oracle::next(&expected);
            prop_assert_eq!(engine.unload_grid(), expected.clone(), "generation {}", generation);
        }
    }

    #[test]
    fn prop_all_dead_stays_dead(rows in 1..=10usize, columns in 1..=10usize, generations in 1..=10usize) {
        let mut engine = SystolicEngine::new(rows, columns).unwrap();

        for _ in 0..generations {
            engine.advance_one_generation();
        }

        prop_assert_eq!(engine.unload_grid(), Grid::new(rows, columns));
    }

    #[test]
    fn prop_lone_boundary_cell_dies(rows in 1..=8usize, columns in 1..=8usize, along in 0..64usize, side in 0..4usize) {
        let pos = match side {
            0 => Position::new(0, along % columns),
            1 => Position::new(rows - 1, along % columns),
            2 => Position::new(along % rows, 0),
            _ => Position::new(along % rows, columns - 1),
        };

        let mut grid = Grid::new(rows, columns);
        *grid.cell_mut(pos).unwrap() = CellState::Alive;

        let mut engine = loaded(&grid);
        engine.advance_one_generation();
        prop_assert_eq!(engine.unload_grid(), Grid::new(rows, columns));
    }

    #[test]
    fn prop_block_is_still(rows in 4..=10usize, columns in 4..=10usize, row_seed: usize, col_seed: usize) {
        // Keep a one-cell dead margin around the block.
        let origin = Position::new(1 + row_seed % (rows - 3), 1 + col_seed % (columns - 3));

        let mut grid = Grid::new(rows, columns);
        Pattern::Block.stamp(&mut grid, origin).unwrap();

        let mut engine = loaded(&grid);
        engine.advance_one_generation();
        prop_assert_eq!(engine.unload_grid(), grid);
    }

    #[test]
    fn prop_blinker_oscillates(rows in 5..=10usize, columns in 5..=10usize) {
        let horizontal = Pattern::Blinker.centered(rows, columns).unwrap();

        let center = Position::new((rows - 1) / 2, (columns - 3) / 2 + 1);
        let mut vertical = Grid::new(rows, columns);
        for row in center.row - 1..=center.row + 1 {
            *vertical.cell_mut((row, center.col)).unwrap() = CellState::Alive;
        }

        let mut engine = loaded(&horizontal);

        engine.advance_one_generation();
        prop_assert_eq!(engine.unload_grid(), vertical);

        engine.advance_one_generation();
        prop_assert_eq!(engine.unload_grid(), horizontal);
    }
}
