//! One generation of the automaton.
//!
//! Every cell reads only the previous buffer and writes only its own slot of a fresh one,
//! so the new buffer is split by rows and filled in parallel when the `parallel` feature
//! is enabled. Both paths produce identical grids.

use hexcell_data::StateId;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::HexGrid;
use crate::neighbors::count_into;
use crate::rules::RuleTable;

fn advance_row(
    grid: &HexGrid,
    rules: &RuleTable,
    y: usize,
    row: &mut [StateId],
    counts: &mut [u32],
) {
    let radius = rules.radius();
    let current = &grid.cells()[y * row.len()..(y + 1) * row.len()];
    for (x, (next, &state)) in row.iter_mut().zip(current).enumerate() {
        count_into(grid, x as u16, y as u16, radius, counts);
        *next = rules.get(state, counts);
    }
}

/// Computes the next generation into a new buffer, leaving `grid` untouched.
#[cfg(feature = "parallel")]
#[must_use]
pub fn next_generation(grid: &HexGrid, rules: &RuleTable) -> Vec<StateId> {
    let width = grid.width() as usize;
    let state_count = rules.state_count();
    let mut next = vec![0; grid.cells().len()];
    next.par_chunks_mut(width).enumerate().for_each_init(
        || vec![0u32; state_count],
        |counts, (y, row)| advance_row(grid, rules, y, row, counts),
    );
    next
}

/// Computes the next generation into a new buffer, leaving `grid` untouched.
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn next_generation(grid: &HexGrid, rules: &RuleTable) -> Vec<StateId> {
    next_generation_sequential(grid, rules)
}

/// Sequential reference implementation of [`next_generation`].
#[must_use]
pub fn next_generation_sequential(grid: &HexGrid, rules: &RuleTable) -> Vec<StateId> {
    let width = grid.width() as usize;
    let mut next = vec![0; grid.cells().len()];
    let mut counts = vec![0u32; rules.state_count()];
    for (y, row) in next.chunks_mut(width).enumerate() {
        advance_row(grid, rules, y, row, &mut counts);
    }
    next
}

/// Advances `grid` by one generation under `rules`.
///
/// # Panics
///
/// Panics if a cell holds a state outside the rule table.
pub fn advance(grid: &mut HexGrid, rules: &RuleTable) {
    let next = next_generation(grid, rules);
    grid.replace_cells(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::generator::random_table;
    use hexcell_data::{Association, RuleEntry};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_inert_rule_is_identity() {
        let mut grid = HexGrid::new(6, 5).unwrap();
        grid.set(2, 2, 1);
        grid.set(4, 1, 2);
        let before = grid.clone();
        advance(&mut grid, &RuleTable::inert(3, 2));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_reads_only_previous_generation() {
        // Background cells with at least one live neighbor come alive; live cells die.
        let mut birth = Association::inert(1, 7);
        for key in 1..7 {
            birth.table[key] = RuleEntry::Next(1);
        }
        let mut death = Association::inert(0, 7);
        for key in 0..7 {
            death.table[key] = RuleEntry::Next(0);
        }
        let rules = RuleTable::from_associations(1, vec![birth, death]).unwrap();

        let mut grid = HexGrid::new(5, 1).unwrap();
        grid.set(0, 0, 1);
        advance(&mut grid, &rules);
        // Only (1, 0) saw the live cell; a left-to-right in-place update would cascade.
        assert_eq!(grid.cells(), &[0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let config = SimulationConfig {
            width: 37,
            height: 23,
            state_count: 4,
            radius: 2,
            random_fill_chance: 0.3,
            ..Default::default()
        };
        let rules = random_table(&config, &mut rng);
        let mut grid = HexGrid::new(config.width, config.height).unwrap();
        grid.fill_random_with_rng(config.random_fill_chance, config.state_count, &mut rng);

        for _ in 0..5 {
            let expected = next_generation_sequential(&grid, &rules);
            advance(&mut grid, &rules);
            assert_eq!(grid.cells(), expected.as_slice());
        }
    }
}
