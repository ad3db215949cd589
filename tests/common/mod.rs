pub mod macros;

use std::path::PathBuf;

use hexcell_core::{Association, HexGrid, RuleEntry, RuleTable};
use hexcell_lib::model::config::AppConfig;
use hexcell_lib::Simulation;

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    seeds: Vec<(u16, u16, u8)>,
    clear: bool,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.simulation.width = 16;
        config.simulation.height = 16;
        config.simulation.state_count = 3;
        config.simulation.radius = 1;
        config.simulation.seed = Some(42);
        Self {
            config,
            seeds: Vec::new(),
            clear: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_dimension(mut self, width: u16, height: u16) -> Self {
        self.config.simulation.width = width;
        self.config.simulation.height = height;
        self
    }

    pub fn with_states(mut self, state_count: usize) -> Self {
        self.config.simulation.state_count = state_count;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.config.simulation.radius = radius;
        self
    }

    pub fn with_library(mut self, directory: &PathBuf) -> Self {
        self.config.library.directory = directory.display().to_string();
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Starts from an all-background grid instead of a random fill.
    pub fn with_empty_grid(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn with_cell(mut self, x: u16, y: u16, state: u8) -> Self {
        self.seeds.push((x, y, state));
        self
    }

    pub fn build(self) -> Simulation {
        let mut sim = Simulation::new(self.config).expect("Failed to build simulation");
        if self.clear {
            sim.grid_mut().reset();
        }
        for (x, y, state) in self.seeds {
            sim.grid_mut().set(x, y, state);
        }
        sim
    }
}

/// Two-state rule where a background cell turns on next to exactly one live cell.
#[allow(dead_code)]
pub fn single_neighbor_birth() -> RuleTable {
    let mut birth = Association::inert(1, 7);
    birth.table[1] = RuleEntry::Next(1);
    RuleTable::from_associations(1, vec![birth, Association::inert(0, 7)])
        .expect("valid rule")
}

#[allow(dead_code)]
pub fn grid_with(width: u16, height: u16, live: &[(u16, u16)]) -> HexGrid {
    let mut grid = HexGrid::new(width, height).expect("valid dimension");
    for &(x, y) in live {
        grid.set(x, y, 1);
    }
    grid
}

/// Fresh scratch directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexcell_it_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
