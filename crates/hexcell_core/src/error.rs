//! Error types for hexcell_core.

use hexcell_data::StateId;
use thiserror::Error;

/// Errors raised by grid and rule operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Zero-sized or oversized grid dimension.
    #[error("Invalid grid dimension {width}x{height}")]
    InvalidDimension { width: u16, height: u16 },

    /// A state id outside `[0, state_count)`.
    #[error("State {state} is out of range for {state_count} states")]
    InvalidState { state: StateId, state_count: usize },

    /// State count outside the supported range.
    #[error("Unsupported state count {0}")]
    InvalidStateCount(usize),

    /// Neighbor radius above the supported maximum.
    #[error("Unsupported neighbor radius {0}")]
    InvalidRadius(u32),

    /// A selector naming a state outside `[0, state_count)`.
    #[error("Association {association}: selector {selector} >= {state_count}")]
    OutOfRangeSelector {
        association: usize,
        selector: StateId,
        state_count: usize,
    },

    /// An association table whose length does not match the radius.
    #[error("Association {association}: table length {len} != {expected}")]
    InvalidTableLength {
        association: usize,
        len: usize,
        expected: usize,
    },
}

/// Result type alias for hexcell_core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
