//! Random rule generation and single-step rule mutation.

use hexcell_data::{Association, RuleEntry, StateId};
use rand::Rng;

use crate::config::{SimulationConfig, MIN_STATES};
use crate::neighbors::neighbor_table_size;
use crate::rules::RuleTable;

/// What a call to [`mutate_with_rng`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// An association now keys on a different neighbor state.
    Selector {
        association: usize,
        from: StateId,
        to: StateId,
    },
    /// A transition was removed.
    Cleared {
        association: usize,
        key: usize,
        from: StateId,
    },
    /// A slot now points at a different state.
    Rewritten {
        association: usize,
        key: usize,
        from: RuleEntry,
        to: StateId,
    },
}

/// Rebuilds `table` with `state_count` associations sized for `radius`.
///
/// Every entry targets a random non-background state, or is `Unchanged` with probability
/// `ignore_chance`. Selectors are uniform over all states, except that the background
/// state's selector is drawn from the non-background states only.
///
/// # Panics
///
/// Panics if `state_count` is below two.
pub fn randomize_with_rng<R: Rng>(
    table: &mut RuleTable,
    state_count: usize,
    radius: u32,
    ignore_chance: f64,
    rng: &mut R,
) {
    assert!(
        state_count >= MIN_STATES,
        "need at least {MIN_STATES} states, got {state_count}"
    );
    let size = neighbor_table_size(radius);
    let ignore_chance = ignore_chance.clamp(0.0, 1.0);

    table.radius = radius;
    table.associations = (0..state_count)
        .map(|_| {
            let entries = (0..size)
                .map(|_| {
                    let next = rng.gen_range(1..state_count) as StateId;
                    if rng.gen_bool(ignore_chance) {
                        RuleEntry::Unchanged
                    } else {
                        RuleEntry::Next(next)
                    }
                })
                .collect();
            Association {
                selector: rng.gen_range(0..state_count) as StateId,
                table: entries,
            }
        })
        .collect();

    // The background association never keys on background neighbors.
    table.associations[0].selector = rng.gen_range(1..state_count) as StateId;

    tracing::debug!(
        state_count,
        radius,
        active = table.active_entries(),
        "Rule randomized"
    );
}

/// Fresh random table for the given configuration.
#[must_use]
pub fn random_table<R: Rng>(config: &SimulationConfig, rng: &mut R) -> RuleTable {
    let mut table = RuleTable::inert(config.state_count, config.radius);
    randomize_with_rng(
        &mut table,
        config.state_count,
        config.radius,
        config.empty_rule_chance,
        rng,
    );
    table
}

/// Applies one random, always observable change to `table`.
///
/// One of three modes is picked uniformly: re-key an association, clear a transition, or
/// retarget a slot. When the picked mode cannot change anything in this table (clearing
/// a table with no transitions, or retargeting a two-state table that is already full),
/// the association is re-keyed instead.
///
/// # Panics
///
/// Panics if the table has fewer than two states.
pub fn mutate_with_rng<R: Rng>(table: &mut RuleTable, rng: &mut R) -> Mutation {
    let state_count = table.state_count();
    assert!(
        state_count >= MIN_STATES,
        "need at least {MIN_STATES} states, got {state_count}"
    );
    let size = table.table_size();

    let has_transition = table.active_entries() > 0;
    let can_retarget = state_count > 2
        || table
            .associations
            .iter()
            .any(|a| a.table.iter().any(|e| e.is_unchanged()));

    let mutation = match rng.gen_range(0..3) {
        1 if has_transition => loop {
            let association = rng.gen_range(0..state_count);
            let key = rng.gen_range(0..size);
            let slot = &mut table.associations[association].table[key];
            if let RuleEntry::Next(from) = *slot {
                *slot = RuleEntry::Unchanged;
                break Mutation::Cleared {
                    association,
                    key,
                    from,
                };
            }
        },
        2 if can_retarget => loop {
            let association = rng.gen_range(0..state_count);
            let key = rng.gen_range(0..size);
            let to = rng.gen_range(1..state_count) as StateId;
            let slot = &mut table.associations[association].table[key];
            if *slot != RuleEntry::Next(to) {
                let from = *slot;
                *slot = RuleEntry::Next(to);
                break Mutation::Rewritten {
                    association,
                    key,
                    from,
                    to,
                };
            }
        },
        _ => {
            let association = rng.gen_range(0..state_count);
            let from = table.associations[association].selector;
            let to = loop {
                let candidate = rng.gen_range(0..state_count) as StateId;
                if candidate != from {
                    break candidate;
                }
            };
            table.associations[association].selector = to;
            Mutation::Selector {
                association,
                from,
                to,
            }
        }
    };

    tracing::debug!(?mutation, "Rule mutated");
    mutation
}
