//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every value the engine needs is carried explicitly by
//! [`SimulationConfig`]; nothing is read from process-wide state.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults, missing keys keep their default)
//! 3. Command line flags applied by the host binary
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [simulation]
//! width = 200
//! height = 120
//! state_count = 5
//! radius = 2
//! empty_rule_chance = 0.6
//! seed = 42
//!
//! [library]
//! directory = "rules"
//!
//! [run]
//! auto_rule_after = 200
//! ```

use std::path::Path;

use hexcell_data::MAX_STATES;
use serde::{Deserialize, Serialize};

use crate::neighbors::neighbor_table_size;

/// Largest accepted grid side.
pub const MAX_DIMENSION: u16 = 4096;
/// Largest accepted neighbor radius.
pub const MAX_RADIUS: u32 = 16;
/// Smallest useful state count: background plus one rule target.
pub const MIN_STATES: usize = 2;

/// Parameters of the automaton itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: u16,
    pub height: u16,
    pub state_count: usize,
    pub radius: u32,
    /// Probability that a cell is seeded with a random state when the grid is refilled.
    pub random_fill_chance: f64,
    /// Probability that a freshly generated rule entry is `Unchanged`.
    pub empty_rule_chance: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            state_count: 4,
            radius: 4,
            random_fill_chance: 0.01,
            empty_rule_chance: 0.5,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Length of every association table for the configured radius.
    #[must_use]
    pub fn neighbor_table_size(&self) -> usize {
        neighbor_table_size(self.radius)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.width > 0, "Grid width must be positive");
        anyhow::ensure!(
            self.width <= MAX_DIMENSION,
            "Grid width too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(self.height > 0, "Grid height must be positive");
        anyhow::ensure!(
            self.height <= MAX_DIMENSION,
            "Grid height too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(
            (MIN_STATES..=MAX_STATES).contains(&self.state_count),
            "State count must be in [{MIN_STATES}, {MAX_STATES}]"
        );
        anyhow::ensure!(
            self.radius <= MAX_RADIUS,
            "Neighbor radius too large (max {MAX_RADIUS})"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.random_fill_chance),
            "Random fill chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.empty_rule_chance),
            "Empty rule chance must be in [0.0, 1.0]"
        );
        Ok(())
    }
}

/// Where saved rules live and how the host picks one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    pub directory: String,
    /// File suffix, without the leading dot.
    pub extension: String,
    /// Number of random picks tried before a library load gives up.
    pub load_attempts: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            directory: "rules".to_string(),
            extension: "dat".to_string(),
            load_attempts: 5000,
        }
    }
}

/// Host loop settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Draw a new rule automatically once the current one has run this many generations.
    pub auto_advance: bool,
    pub auto_rule_after: u64,
    /// Generations between progress log lines.
    pub log_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            auto_advance: false,
            auto_rule_after: 125,
            log_interval: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub library: LibraryConfig,
    pub run: RunConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.simulation.validate()?;

        anyhow::ensure!(
            !self.library.directory.trim().is_empty(),
            "Rule directory must not be empty"
        );
        anyhow::ensure!(
            !self.library.extension.is_empty() && !self.library.extension.starts_with('.'),
            "Rule extension must be non-empty and given without a leading dot"
        );
        anyhow::ensure!(
            self.library.load_attempts > 0,
            "Load attempts must be positive"
        );

        anyhow::ensure!(
            self.run.auto_rule_after > 0,
            "Auto rule interval must be positive"
        );
        anyhow::ensure!(self.run.log_interval > 0, "Log interval must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.simulation).as_bytes());
        hasher.update(format!("{:?}", self.run).as_bytes());
        hex::encode(hasher.finalize())
    }
}
