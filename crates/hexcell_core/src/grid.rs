//! Hexagonal cell grid stored as a flat, row-major state buffer.
//!
//! Rows use "odd-r" offset layout: odd rows are shifted half a cell to the right,
//! which is what the neighbor enumeration in [`crate::neighbors`] corrects for.

use hexcell_data::StateId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MAX_DIMENSION;
use crate::error::{CoreError, Result};

/// Read-only view a renderer needs to paint the grid.
pub trait CellView {
    fn size(&self) -> usize;
    fn state_at(&self, index: usize) -> StateId;
    fn dimension(&self) -> (u16, u16);
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HexGrid {
    cells: Vec<StateId>,
    width: u16,
    height: u16,
}

fn check_dimension(width: u16, height: u16) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CoreError::InvalidDimension { width, height });
    }
    Ok(())
}

impl HexGrid {
    /// Creates a grid with every cell in the background state.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        check_dimension(width, height)?;
        Ok(Self {
            cells: vec![0; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Builds a grid from existing cell data, e.g. a saved frame.
    pub fn from_cells(width: u16, height: u16, cells: Vec<StateId>) -> Result<Self> {
        check_dimension(width, height)?;
        if cells.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimension { width, height });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[StateId] {
        &self.cells
    }

    #[inline(always)]
    #[must_use]
    pub fn index(&self, x: u16, y: u16) -> usize {
        (y as usize * self.width as usize) + x as usize
    }

    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// State at a signed coordinate, or `None` when it lies outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<StateId> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Writes a state. Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: u16, y: u16, state: StateId) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.cells[idx] = state;
    }

    /// Puts every cell back into the background state.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Reallocates the grid at a new size. Prior contents are discarded.
    ///
    /// An invalid dimension is rejected before anything is touched.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        check_dimension(width, height)?;
        self.cells = vec![0; width as usize * height as usize];
        self.width = width;
        self.height = height;
        tracing::debug!(width, height, "Grid reallocated");
        Ok(())
    }

    /// Background everywhere, with each cell independently seeded with a uniformly random
    /// state in `[0, state_count)` with probability `fill_chance`.
    pub fn fill_random_with_rng<R: Rng>(
        &mut self,
        fill_chance: f64,
        state_count: usize,
        rng: &mut R,
    ) {
        let fill_chance = fill_chance.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            *cell = 0;
            if rng.gen_bool(fill_chance) {
                *cell = rng.gen_range(0..state_count) as StateId;
            }
        }
    }

    /// Population of each state.
    #[must_use]
    pub fn histogram(&self, state_count: usize) -> Vec<usize> {
        let mut counts = vec![0usize; state_count];
        for &cell in &self.cells {
            if let Some(slot) = counts.get_mut(cell as usize) {
                *slot += 1;
            }
        }
        counts
    }

    /// Checks that every stored state is below `state_count`.
    pub fn validate_states(&self, state_count: usize) -> Result<()> {
        match self.cells.iter().find(|&&c| c as usize >= state_count) {
            Some(&state) => Err(CoreError::InvalidState { state, state_count }),
            None => Ok(()),
        }
    }

    /// Swaps in the next generation's buffer.
    pub(crate) fn replace_cells(&mut self, next: Vec<StateId>) {
        debug_assert_eq!(next.len(), self.cells.len());
        self.cells = next;
    }
}

impl CellView for HexGrid {
    #[inline]
    fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn state_at(&self, index: usize) -> StateId {
        self.cells[index]
    }

    #[inline]
    fn dimension(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
