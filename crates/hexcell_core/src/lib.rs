//! # Hexcell Core
//!
//! The simulation engine for a generalized cellular automaton on a hexagonal grid.
//!
//! Each cell holds a small state id. Each generation, a cell's next state is looked up in a
//! [`RuleTable`] keyed by how many of its neighbors, within a configurable hex radius, are in
//! one selected state.
//!
//! This crate contains:
//! - The flat offset-coordinate grid ([`HexGrid`])
//! - Radius-parameterized hex neighbor enumeration
//! - The rule table, its random generation and mutation
//! - Double-buffered stepping, parallelized per row with Rayon
//! - Configuration, palette generation, metrics and logging setup
//!
//! ## Example
//!
//! ```
//! use hexcell_core::{advance, random_table, HexGrid, SimulationConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = SimulationConfig { width: 32, height: 32, radius: 2, ..Default::default() };
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let rules = random_table(&config, &mut rng);
//!
//! let mut grid = HexGrid::new(config.width, config.height).unwrap();
//! grid.fill_random_with_rng(0.2, config.state_count, &mut rng);
//! advance(&mut grid, &rules);
//! assert!(grid.validate_states(config.state_count).is_ok());
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types for grid and rule operations
pub mod error;
/// Random rule generation and mutation
pub mod generator;
/// Offset-coordinate hex grid
pub mod grid;
/// Performance metrics collection and structured logging
pub mod metrics;
/// Hex neighborhood enumeration and counting
pub mod neighbors;
/// State color palette generation
pub mod palette;
/// Transition rule table
pub mod rules;
/// Generation stepping
pub mod step;

pub use config::{AppConfig, SimulationConfig};
pub use error::{CoreError, Result};
pub use generator::{mutate_with_rng, random_table, randomize_with_rng, Mutation};
pub use grid::{CellView, HexGrid};
pub use hexcell_data::{Association, Palette, Rgb, RuleEntry, StateId};
pub use metrics::{init_logging, Metrics};
pub use neighbors::neighbor_table_size;
pub use rules::RuleTable;
pub use step::advance;
