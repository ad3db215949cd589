//! Transition rule table.
//!
//! One [`Association`] per state. For a cell in state `s`, the association at `s` names a
//! selector state; the number of neighbors in the selector state is the key into the
//! association's table, whose entry gives the next state or leaves the cell alone.

use std::fmt;

use hexcell_data::{Association, RuleEntry, StateId, MAX_STATES};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_RADIUS, MIN_STATES};
use crate::error::{CoreError, Result};
use crate::neighbors::neighbor_table_size;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    pub(crate) associations: Vec<Association>,
    pub(crate) radius: u32,
}

impl RuleTable {
    /// A table where every entry is `Unchanged` and every selector is the background state.
    #[must_use]
    pub fn inert(state_count: usize, radius: u32) -> Self {
        let size = neighbor_table_size(radius);
        Self {
            associations: (0..state_count).map(|_| Association::inert(0, size)).collect(),
            radius,
        }
    }

    /// Builds a table from explicit associations, checking every invariant.
    pub fn from_associations(radius: u32, associations: Vec<Association>) -> Result<Self> {
        let table = Self {
            associations,
            radius,
        };
        table.validate()?;
        Ok(table)
    }

    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.associations.len()
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Entries per association for this table's radius.
    #[inline]
    #[must_use]
    pub fn table_size(&self) -> usize {
        neighbor_table_size(self.radius)
    }

    #[must_use]
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    #[must_use]
    pub fn association(&self, state: StateId) -> Option<&Association> {
        self.associations.get(state as usize)
    }

    /// Next state of a cell currently in `target`, given its neighbor counts.
    ///
    /// # Panics
    ///
    /// Panics when `target`, the selector or the looked-up count falls outside the table.
    /// Tables built by the generator or accepted by [`RuleTable::validate`] never do.
    #[inline]
    #[must_use]
    pub fn get(&self, target: StateId, counts: &[u32]) -> StateId {
        debug_assert_eq!(counts.len(), self.associations.len());
        let association = &self.associations[target as usize];
        let key = counts[association.selector as usize] as usize;
        match association.table.get(key) {
            Some(entry) => entry.resolve(target),
            None => panic!(
                "neighbor count {key} outside table of {} for state {target}",
                association.table.len()
            ),
        }
    }

    /// Checks shape and range invariants.
    pub fn validate(&self) -> Result<()> {
        let state_count = self.state_count();
        if !(MIN_STATES..=MAX_STATES).contains(&state_count) {
            return Err(CoreError::InvalidStateCount(state_count));
        }
        if self.radius > MAX_RADIUS {
            return Err(CoreError::InvalidRadius(self.radius));
        }
        let size = self.table_size();
        for (i, assoc) in self.associations.iter().enumerate() {
            if assoc.selector as usize >= state_count {
                return Err(CoreError::OutOfRangeSelector {
                    association: i,
                    selector: assoc.selector,
                    state_count,
                });
            }
            if assoc.table.len() != size {
                return Err(CoreError::InvalidTableLength {
                    association: i,
                    len: assoc.table.len(),
                    expected: size,
                });
            }
            if let Some(state) = assoc
                .table
                .iter()
                .filter_map(|e| e.state())
                .find(|&s| s as usize >= state_count)
            {
                return Err(CoreError::InvalidState { state, state_count });
            }
        }
        Ok(())
    }

    /// Entries that move a cell, over all associations.
    #[must_use]
    pub fn active_entries(&self) -> usize {
        self.associations.iter().map(Association::active_entries).sum()
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, assoc) in self.associations.iter().enumerate() {
            writeln!(
                f,
                "state {state}, keyed on neighbor state {}:",
                assoc.selector
            )?;
            let pairs: Vec<String> = assoc
                .table
                .iter()
                .enumerate()
                .filter_map(|(count, entry)| match entry {
                    RuleEntry::Next(next) => Some(format!("{count} -> {next}")),
                    RuleEntry::Unchanged => None,
                })
                .collect();
            if pairs.is_empty() {
                writeln!(f, "  (no transitions)")?;
            } else {
                writeln!(f, "  {}", pairs.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_table() -> RuleTable {
        let mut birth = Association::inert(1, 7);
        birth.table[1] = RuleEntry::Next(1);
        let mut death = Association::inert(1, 7);
        death.table[0] = RuleEntry::Next(0);
        RuleTable::from_associations(1, vec![birth, death]).unwrap()
    }

    #[test]
    fn test_get_applies_entry() {
        let table = two_state_table();
        assert_eq!(table.get(0, &[5, 1]), 1);
        assert_eq!(table.get(0, &[4, 2]), 0);
        assert_eq!(table.get(1, &[6, 0]), 0);
        assert_eq!(table.get(1, &[3, 3]), 1);
    }

    #[test]
    fn test_get_is_pure() {
        let table = two_state_table();
        let before = table.clone();
        let first = table.get(0, &[5, 1]);
        let second = table.get(0, &[5, 1]);
        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    #[should_panic]
    fn test_get_fails_fast_on_oversized_count() {
        let table = two_state_table();
        let _ = table.get(0, &[0, 7]);
    }

    #[test]
    fn test_validate_rejects_bad_selector() {
        let result = RuleTable::from_associations(
            1,
            vec![Association::inert(2, 7), Association::inert(0, 7)],
        );
        assert_eq!(
            result,
            Err(CoreError::OutOfRangeSelector {
                association: 0,
                selector: 2,
                state_count: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_wrong_table_length() {
        let result = RuleTable::from_associations(
            2,
            vec![Association::inert(0, 7), Association::inert(0, 7)],
        );
        assert_eq!(
            result,
            Err(CoreError::InvalidTableLength {
                association: 0,
                len: 7,
                expected: 19
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_target() {
        let mut assoc = Association::inert(0, 7);
        assoc.table[3] = RuleEntry::Next(9);
        let result = RuleTable::from_associations(1, vec![assoc, Association::inert(0, 7)]);
        assert_eq!(
            result,
            Err(CoreError::InvalidState {
                state: 9,
                state_count: 2
            })
        );
    }

    #[test]
    fn test_inert_shape() {
        let table = RuleTable::inert(5, 3);
        assert_eq!(table.state_count(), 5);
        assert_eq!(table.table_size(), 37);
        assert_eq!(table.active_entries(), 0);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_display_lists_transitions() {
        let text = two_state_table().to_string();
        assert!(text.contains("state 0, keyed on neighbor state 1:"));
        assert!(text.contains("1 -> 1"));
        assert!(text.contains("0 -> 0"));
        assert!(!text.contains("2 -> "));
    }
}
