use std::time::Instant;

use anyhow::Result;
use hexcell_core::config::{AppConfig, SimulationConfig};
use hexcell_core::error::CoreError;
use hexcell_core::generator::{mutate_with_rng, randomize_with_rng, Mutation};
use hexcell_core::palette::generate_palette_with_rng;
use hexcell_core::{advance, HexGrid, Metrics, Palette, RuleTable, StateId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Host-side owner of the grid, the current rule and everything the controls touch.
///
/// All operations take `&mut self`, so stepping, rule changes and resizes can never
/// overlap.
pub struct Simulation {
    pub(super) config: AppConfig,
    pub(super) grid: HexGrid,
    pub(super) rules: RuleTable,
    pub(super) palette: Palette,
    pub(super) generation: u64,
    pub(super) rule_age: u64,
    pub(super) rng: ChaCha8Rng,
    pub(super) metrics: Metrics,
}

impl Simulation {
    /// Validates `config`, draws a first rule and palette, and fills the grid.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let sim = &config.simulation;
        let mut rng = match sim.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let grid = HexGrid::new(sim.width, sim.height)?;
        let palette = generate_palette_with_rng(sim.state_count, &mut rng);
        let rules = RuleTable::inert(sim.state_count, sim.radius);
        let metrics = Metrics::new(config.run.log_interval);

        let mut simulation = Self {
            config,
            grid,
            rules,
            palette,
            generation: 0,
            rule_age: 0,
            rng,
            metrics,
        };
        simulation.next_random_rule();

        tracing::info!(
            width = simulation.config.simulation.width,
            height = simulation.config.simulation.height,
            states = simulation.config.simulation.state_count,
            radius = simulation.config.simulation.radius,
            fingerprint = %simulation.config.fingerprint(),
            "Simulation initialized"
        );
        Ok(simulation)
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &SimulationConfig {
        &self.config.simulation
    }

    #[must_use]
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Direct cell access for seeding patterns.
    ///
    /// Every state written must stay below the current state count; stepping a grid that
    /// holds a larger state panics. [`Simulation::set_cell`] checks this.
    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    /// Writes one cell, rejecting off-grid coordinates and states the rule does not know.
    pub fn set_cell(&mut self, x: u16, y: u16, state: StateId) -> Result<()> {
        anyhow::ensure!(
            x < self.grid.width() && y < self.grid.height(),
            "Cell ({x}, {y}) outside {}x{} grid",
            self.grid.width(),
            self.grid.height()
        );
        let state_count = self.rules.state_count();
        if state as usize >= state_count {
            return Err(CoreError::InvalidState { state, state_count }.into());
        }
        self.grid.set(x, y, state);
        Ok(())
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Generations stepped since the simulation was created.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generations stepped under the current rule.
    #[must_use]
    pub fn rule_age(&self) -> u64 {
        self.rule_age
    }

    /// Per-state population of the grid.
    #[must_use]
    pub fn histogram(&self) -> Vec<usize> {
        self.grid.histogram(self.rules.state_count())
    }

    /// Advances one generation, then swaps in a new random rule if auto-advance is on and
    /// the current one has run its course.
    pub fn step(&mut self) {
        let start = Instant::now();
        advance(&mut self.grid, &self.rules);
        self.metrics.record_step(start.elapsed(), self.grid.cells().len());
        self.generation += 1;
        self.rule_age += 1;

        if self.config.run.auto_advance && self.rule_age > self.config.run.auto_rule_after {
            self.next_random_rule();
        }
    }

    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Replaces the rule with a freshly randomized one and refills the grid.
    pub fn next_random_rule(&mut self) {
        let sim = &self.config.simulation;
        randomize_with_rng(
            &mut self.rules,
            sim.state_count,
            sim.radius,
            sim.empty_rule_chance,
            &mut self.rng,
        );
        self.randomize_grid();
        self.rule_age = 0;
        self.metrics.record_rule("random");
        tracing::debug!(rule = %self.rules, "New random rule");
    }

    /// Reseeds the grid using the configured fill chance.
    pub fn randomize_grid(&mut self) {
        let sim = &self.config.simulation;
        self.grid
            .fill_random_with_rng(sim.random_fill_chance, sim.state_count, &mut self.rng);
    }

    /// Applies a single random change to the current rule.
    pub fn mutate_rule(&mut self) -> Mutation {
        let mutation = mutate_with_rng(&mut self.rules, &mut self.rng);
        self.metrics.record_mutation();
        mutation
    }

    pub fn regenerate_palette(&mut self) {
        let state_count = self.config.simulation.state_count;
        self.palette = generate_palette_with_rng(state_count, &mut self.rng);
    }

    fn update_settings<F>(&mut self, modify: F) -> Result<()>
    where
        F: FnOnce(&mut SimulationConfig),
    {
        let mut candidate = self.config.simulation.clone();
        modify(&mut candidate);
        candidate.validate()?;
        self.config.simulation = candidate;
        Ok(())
    }

    /// Changes the number of states: new palette, new rule, refilled grid.
    pub fn set_state_count(&mut self, state_count: usize) -> Result<()> {
        self.update_settings(|s| s.state_count = state_count)?;
        self.next_random_rule();
        self.regenerate_palette();
        Ok(())
    }

    /// Changes the neighbor radius. The rule is rebuilt for the new table size.
    pub fn set_radius(&mut self, radius: u32) -> Result<()> {
        self.update_settings(|s| s.radius = radius)?;
        self.next_random_rule();
        Ok(())
    }

    pub fn set_empty_rule_chance(&mut self, chance: f64) -> Result<()> {
        self.update_settings(|s| s.empty_rule_chance = chance)?;
        self.next_random_rule();
        Ok(())
    }

    pub fn set_random_fill_chance(&mut self, chance: f64) -> Result<()> {
        self.update_settings(|s| s.random_fill_chance = chance)?;
        self.randomize_grid();
        Ok(())
    }

    /// Reallocates the grid. Every cell starts in the background state.
    ///
    /// An invalid dimension leaves the current grid and settings untouched.
    pub fn set_dimension(&mut self, width: u16, height: u16) -> Result<()> {
        self.grid.resize(width, height)?;
        self.config.simulation.width = width;
        self.config.simulation.height = height;
        Ok(())
    }
}
