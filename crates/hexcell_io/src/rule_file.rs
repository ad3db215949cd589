//! Binary rule file format.
//!
//! Layout, all integers and floats little-endian:
//!
//! | field                | type            |
//! |----------------------|-----------------|
//! | state count `n`      | `u32`           |
//! | neighbor radius `R`  | `i32`           |
//! | random fill chance   | `f64`           |
//! | empty rule chance    | `f64`           |
//! | palette              | `n` × `[r, g, b]` |
//! | associations         | `n` × (`u32` selector, `3R(R+1)+1` entry bytes) |
//!
//! An entry byte is the target state id, or `0xFF` for "unchanged". The per-association
//! length follows from the radius stored in the file, never from the caller's settings.

use std::path::Path;

use hexcell_core::config::{MAX_RADIUS, MIN_STATES};
use hexcell_core::{neighbor_table_size, RuleTable};
use hexcell_data::{Association, Palette, Rgb, RuleEntry, StateId, MAX_STATES};

use crate::error::{IoError, Result};

const UNCHANGED_BYTE: u8 = u8::MAX;
const HEADER_LEN: usize = 4 + 4 + 8 + 8;

/// A rule together with the parameters and palette it was explored with.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFile {
    pub rules: RuleTable,
    pub palette: Palette,
    pub random_fill_chance: f64,
    pub empty_rule_chance: f64,
}

fn is_chance(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

fn check_chance(name: &str, value: f64) -> Result<()> {
    if is_chance(value) {
        Ok(())
    } else {
        Err(IoError::invalid_rule(format!("{name} {value} outside [0, 1]")))
    }
}

/// Total encoded length for a given shape.
fn encoded_len(state_count: usize, radius: u32) -> usize {
    HEADER_LEN + state_count * 3 + state_count * (4 + neighbor_table_size(radius))
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(IoError::invalid_rule(format!(
                "truncated while reading {what} at byte {}",
                self.pos
            ))),
        }
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        self.array(what).map(u32::from_le_bytes)
    }

    fn i32(&mut self, what: &str) -> Result<i32> {
        self.array(what).map(i32::from_le_bytes)
    }

    fn f64(&mut self, what: &str) -> Result<f64> {
        self.array(what).map(f64::from_le_bytes)
    }
}

impl RuleFile {
    #[must_use]
    pub fn new(
        rules: RuleTable,
        palette: Palette,
        random_fill_chance: f64,
        empty_rule_chance: f64,
    ) -> Self {
        Self {
            rules,
            palette,
            random_fill_chance,
            empty_rule_chance,
        }
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.rules.state_count()
    }

    #[must_use]
    pub fn radius(&self) -> u32 {
        self.rules.radius()
    }

    /// Serializes to the binary layout described in the module docs.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let state_count = self.state_count();
        let radius = self.radius();
        self.rules
            .validate()
            .map_err(|e| IoError::validation(e.to_string()))?;
        if self.palette.len() != state_count {
            return Err(IoError::validation(format!(
                "palette has {} colors for {state_count} states",
                self.palette.len()
            )));
        }
        if !is_chance(self.random_fill_chance) || !is_chance(self.empty_rule_chance) {
            return Err(IoError::validation(format!(
                "chances ({}, {}) outside [0, 1]",
                self.random_fill_chance, self.empty_rule_chance
            )));
        }

        let mut out = Vec::with_capacity(encoded_len(state_count, radius));
        out.extend_from_slice(&(state_count as u32).to_le_bytes());
        out.extend_from_slice(&(radius as i32).to_le_bytes());
        out.extend_from_slice(&self.random_fill_chance.to_le_bytes());
        out.extend_from_slice(&self.empty_rule_chance.to_le_bytes());
        for color in &self.palette.colors {
            out.extend_from_slice(&color.to_array());
        }
        for assoc in self.rules.associations() {
            out.extend_from_slice(&u32::from(assoc.selector).to_le_bytes());
            out.extend(assoc.table.iter().map(|entry| match entry {
                RuleEntry::Unchanged => UNCHANGED_BYTE,
                RuleEntry::Next(state) => *state,
            }));
        }
        debug_assert_eq!(out.len(), encoded_len(state_count, radius));
        Ok(out)
    }

    /// Parses a rule file. Any malformed input yields [`IoError::InvalidRuleFile`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);

        let state_count = reader.u32("state count")? as usize;
        if !(MIN_STATES..=MAX_STATES).contains(&state_count) {
            return Err(IoError::invalid_rule(format!(
                "state count {state_count} outside [{MIN_STATES}, {MAX_STATES}]"
            )));
        }
        let radius = reader.i32("neighbor radius")?;
        if radius < 0 || radius as u32 > MAX_RADIUS {
            return Err(IoError::invalid_rule(format!(
                "neighbor radius {radius} outside [0, {MAX_RADIUS}]"
            )));
        }
        let radius = radius as u32;
        let random_fill_chance = reader.f64("random fill chance")?;
        check_chance("random fill chance", random_fill_chance)?;
        let empty_rule_chance = reader.f64("empty rule chance")?;
        check_chance("empty rule chance", empty_rule_chance)?;

        let colors = (0..state_count)
            .map(|_| reader.array::<3>("palette").map(Rgb::from))
            .collect::<Result<Vec<_>>>()?;

        let table_size = neighbor_table_size(radius);
        let mut associations = Vec::with_capacity(state_count);
        for index in 0..state_count {
            let selector = reader.u32("selector")?;
            if selector as usize >= state_count {
                return Err(IoError::invalid_rule(format!(
                    "association {index}: selector {selector} >= {state_count}"
                )));
            }
            let table = reader
                .take(table_size, "rule table")?
                .iter()
                .map(|&byte| match byte {
                    UNCHANGED_BYTE => Ok(RuleEntry::Unchanged),
                    state if (state as usize) < state_count => Ok(RuleEntry::Next(state)),
                    state => Err(IoError::invalid_rule(format!(
                        "association {index}: target state {state} >= {state_count}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            associations.push(Association {
                selector: selector as StateId,
                table,
            });
        }

        if reader.pos != bytes.len() {
            return Err(IoError::invalid_rule(format!(
                "{} trailing bytes after {state_count} associations",
                bytes.len() - reader.pos
            )));
        }

        let rules = RuleTable::from_associations(radius, associations)
            .map_err(|e| IoError::invalid_rule(e.to_string()))?;

        Ok(Self {
            rules,
            palette: Palette::new(colors),
            random_fill_chance,
            empty_rule_chance,
        })
    }

    /// Writes the encoded rule to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.encode()?;
        std::fs::write(&path, bytes).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("writing rule to {:?}", path.as_ref()))
        })?;
        tracing::debug!(path = ?path.as_ref(), "Rule saved");
        Ok(())
    }

    /// Reads and decodes `path`. Nothing outside the returned value is modified.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(&path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("reading rule from {:?}", path.as_ref()))
        })?;
        Self::decode(&bytes)
            .map_err(|e| e.with_context(format!("decoding {:?}", path.as_ref())))
    }
}
