//! # Hexcell IO
//!
//! Persistence layer for the hexcell automaton.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The binary rule file format
//! - A directory-backed library of saved rules
//! - JSON helpers and renderer frame export

/// Error types and result aliases for I/O operations
pub mod error;
/// Directory-backed rule library with timestamped naming and random loading
pub mod library;
/// Binary encode/decode of rules with their parameters and palette
pub mod rule_file;
/// JSON helpers and renderer frame export
pub mod serialization;

pub use error::{IoError, Result};
pub use library::RuleLibrary;
pub use rule_file::RuleFile;
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file, Frame};
