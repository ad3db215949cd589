/// Asserts the state of each listed `(x, y)` cell.
#[macro_export]
macro_rules! assert_cells {
    ($grid:expr, $state:expr, [$(($x:expr, $y:expr)),* $(,)?]) => {
        $(
            assert_eq!(
                $grid.get($x, $y),
                Some($state),
                "Cell ({}, {}) should be in state {}",
                $x,
                $y,
                $state
            );
        )*
    };
}

/// Asserts that every cell of the grid holds a state below `state_count`.
#[macro_export]
macro_rules! assert_states_valid {
    ($grid:expr, $state_count:expr) => {
        assert!(
            $grid.validate_states($state_count).is_ok(),
            "Grid holds a state outside 0..{}",
            $state_count
        );
    };
}
