use serde::{Deserialize, Serialize};

/// Identifier of a cell state. `0` is the background (quiescent) state.
pub type StateId = u8;

/// Upper bound on the number of distinct states a simulation may use.
///
/// Valid ids are `0..MAX_STATES`, which keeps `u8::MAX` free for the on-disk
/// "unchanged" marker.
pub const MAX_STATES: usize = u8::MAX as usize;

/// A single slot of an association's lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleEntry {
    /// The rule does not apply; the cell keeps its current state.
    #[default]
    Unchanged,
    /// The cell moves to the given state.
    Next(StateId),
}

impl RuleEntry {
    /// Resolves the entry against the cell's current state.
    #[inline]
    #[must_use]
    pub fn resolve(self, current: StateId) -> StateId {
        match self {
            RuleEntry::Unchanged => current,
            RuleEntry::Next(state) => state,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_unchanged(self) -> bool {
        matches!(self, RuleEntry::Unchanged)
    }

    /// Returns the target state, if any.
    #[inline]
    #[must_use]
    pub fn state(self) -> Option<StateId> {
        match self {
            RuleEntry::Unchanged => None,
            RuleEntry::Next(state) => Some(state),
        }
    }
}

/// Rule entry for one current state.
///
/// `selector` picks which neighbor state's count is used as the key into `table`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Association {
    pub selector: StateId,
    pub table: Vec<RuleEntry>,
}

impl Association {
    /// Creates an association whose table is entirely `Unchanged`.
    #[must_use]
    pub fn inert(selector: StateId, table_size: usize) -> Self {
        Self {
            selector,
            table: vec![RuleEntry::Unchanged; table_size],
        }
    }

    /// Number of entries that actually move a cell to another state.
    #[must_use]
    pub fn active_entries(&self) -> usize {
        self.table.iter().filter(|e| !e.is_unchanged()).count()
    }
}
