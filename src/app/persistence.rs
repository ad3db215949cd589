use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hexcell_io::{write_json_file, Frame, RuleFile, RuleLibrary};

use super::state::Simulation;

impl Simulation {
    /// Snapshot of the current rule, palette and chances as a saveable file.
    #[must_use]
    pub fn rule_file(&self) -> RuleFile {
        let sim = &self.config.simulation;
        RuleFile::new(
            self.rules.clone(),
            self.palette.clone(),
            sim.random_fill_chance,
            sim.empty_rule_chance,
        )
    }

    #[must_use]
    pub fn library(&self) -> RuleLibrary {
        RuleLibrary::from_config(&self.config.library)
    }

    /// Saves the current rule into the library under a timestamped name.
    pub fn save_rule(&self) -> Result<PathBuf> {
        let path = self
            .library()
            .save(&self.rule_file())
            .context("Failed to save rule to library")?;
        Ok(path)
    }

    pub fn save_rule_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.rule_file()
            .save(&path)
            .with_context(|| format!("Failed to save rule to {:?}", path.as_ref()))
    }

    /// Loads a rule file and makes it current.
    ///
    /// The file is fully decoded before anything changes, so a rejected file leaves the
    /// running rule, palette and settings as they were.
    pub fn load_rule(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = RuleFile::load(&path)?;
        self.adopt(file);
        Ok(())
    }

    /// Loads a randomly chosen rule from the library and makes it current.
    pub fn load_random_rule(&mut self) -> Result<PathBuf> {
        let attempts = self.config.library.load_attempts;
        let (path, file) = self.library().load_random(&mut self.rng, attempts)?;
        self.adopt(file);
        Ok(path)
    }

    fn adopt(&mut self, file: RuleFile) {
        let sim = &mut self.config.simulation;
        sim.state_count = file.state_count();
        sim.radius = file.radius();
        sim.random_fill_chance = file.random_fill_chance;
        sim.empty_rule_chance = file.empty_rule_chance;

        self.rules = file.rules;
        self.palette = file.palette;
        self.randomize_grid();
        self.rule_age = 0;
        self.metrics.record_rule("file");
        tracing::debug!(rule = %self.rules, "Adopted rule from file");
    }

    /// Current generation as a renderer frame.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.grid, &self.palette, self.generation)
    }

    pub fn export_frame(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json_file(&self.frame(), &path)
            .with_context(|| format!("Failed to write frame to {:?}", path.as_ref()))
    }
}
