//! Plain data types shared by the hexcell crates.
//!
//! Nothing in here knows how to step an automaton or talk to the file system; these are the
//! shapes that the core engine, the I/O layer and the host pass between each other.

pub mod data;

pub use data::color::{Palette, Rgb, BACKGROUND_COLOR};
pub use data::rule::{Association, RuleEntry, StateId, MAX_STATES};
