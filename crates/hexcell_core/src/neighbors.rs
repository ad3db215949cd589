//! Hex neighborhood enumeration in offset coordinates.
//!
//! A neighborhood of radius `R` is walked as `2R + 1` horizontal rings, one per row offset
//! `dy` in `-R..=R`. The ring on the center row is `2R + 1` cells wide and each row further
//! away loses one cell, so the walk covers `3R(R + 1) + 1` cells including the center.
//! Because odd rows sit half a cell to the right, rings at an odd `dy` around an odd row
//! start one column further right.

use hexcell_data::StateId;

use crate::grid::HexGrid;

/// Number of cells within hex distance `radius`, center included.
///
/// This is also the number of distinct values a single state's neighbor count can take
/// (`0..=3R(R + 1)`), which sizes every association table.
#[inline]
#[must_use]
pub const fn neighbor_table_size(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * (r + 1) + 1
}

/// Visits every coordinate within `radius` of `(x, y)`, excluding `(x, y)` itself.
///
/// Coordinates are not bounds checked; callers decide what an off-grid position means.
pub fn for_each_neighbor<F>(x: i32, y: i32, radius: u32, mut visit: F)
where
    F: FnMut(i32, i32),
{
    let r = radius as i32;
    let odd_row = y % 2 != 0;

    for col in 0..=2 * r {
        let dy = col - r;
        let width = if col <= r { col + r + 1 } else { (2 * r + 1) - (col - r) };
        let shift = if dy % 2 != 0 && odd_row { 1 } else { 0 };
        let cy = y + dy;

        for i in 0..width {
            let cx = x + i - r + dy.abs() / 2 + shift;
            if cx == x && cy == y {
                continue;
            }
            visit(cx, cy);
        }
    }
}

/// All neighbor coordinates of `(x, y)` within `radius`, in enumeration order.
#[must_use]
pub fn neighbor_positions(x: i32, y: i32, radius: u32) -> Vec<(i32, i32)> {
    let mut out = Vec::with_capacity(neighbor_table_size(radius) - 1);
    for_each_neighbor(x, y, radius, |cx, cy| out.push((cx, cy)));
    out
}

/// Counts neighbor states into `counts`, which must hold one slot per state.
///
/// Off-grid positions are skipped. The buffer is cleared first so it can be reused
/// across cells.
pub fn count_into(grid: &HexGrid, x: u16, y: u16, radius: u32, counts: &mut [u32]) {
    counts.fill(0);
    for_each_neighbor(x as i32, y as i32, radius, |cx, cy| {
        if let Some(state) = grid.get(cx, cy) {
            counts[state as usize] += 1;
        }
    });
}

/// Per-state neighbor counts for the cell at `(x, y)`.
#[must_use]
pub fn count(grid: &HexGrid, x: u16, y: u16, radius: u32, state_count: usize) -> Vec<u32> {
    let mut counts = vec![0; state_count];
    count_into(grid, x, y, radius, &mut counts);
    counts
}

/// Neighbor count of a single state, without building the full vector.
#[must_use]
pub fn count_state(grid: &HexGrid, x: u16, y: u16, radius: u32, state: StateId) -> u32 {
    let mut total = 0;
    for_each_neighbor(x as i32, y as i32, radius, |cx, cy| {
        if grid.get(cx, cy) == Some(state) {
            total += 1;
        }
    });
    total
}
