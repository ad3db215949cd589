//! Directory of saved rule files.
//!
//! Rules are written under timestamped names and picked back at random by suffix.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use hexcell_core::config::LibraryConfig;
use rand::Rng;

use crate::error::{IoError, Result};
use crate::rule_file::RuleFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLibrary {
    directory: PathBuf,
    extension: String,
}

impl RuleLibrary {
    /// `extension` is given without the leading dot.
    #[must_use]
    pub fn new<P: Into<PathBuf>, S: Into<String>>(directory: P, extension: S) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(&config.directory, &config.extension)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name for a rule saved at `time`, e.g. `20261017_142501_337_rule.dat`.
    #[must_use]
    pub fn file_name_at(&self, time: DateTime<Local>) -> String {
        format!("{}_rule.{}", time.format("%Y%m%d_%H%M%S_%3f"), self.extension)
    }

    /// Rule files in the directory, sorted by name. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.directory).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("listing {:?}", self.directory))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.as_str()));
            if matches {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Saves `file` under a fresh timestamped name and returns its path.
    pub fn save(&self, file: &RuleFile) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating {:?}", self.directory))
        })?;

        let now = Local::now();
        let mut path = self.directory.join(self.file_name_at(now));
        let mut suffix = 1;
        while path.exists() {
            let stem = self.file_name_at(now);
            let stem = stem.trim_end_matches(&format!(".{}", self.extension));
            path = self
                .directory
                .join(format!("{stem}_{suffix}.{}", self.extension));
            suffix += 1;
        }

        file.save(&path)?;
        tracing::info!(path = %path.display(), "Rule saved to library");
        Ok(path)
    }

    /// Loads a uniformly chosen rule file, trying other picks when one fails to decode.
    ///
    /// Gives up after `attempts` picks with the last decode error. An empty directory is
    /// reported as [`IoError::EmptyFileSet`] without reading anything.
    pub fn load_random<R: Rng>(&self, rng: &mut R, attempts: usize) -> Result<(PathBuf, RuleFile)> {
        let files = self.list()?;
        if files.is_empty() {
            return Err(IoError::EmptyFileSet {
                directory: self.directory.display().to_string(),
                extension: self.extension.clone(),
            });
        }

        let mut last_error = None;
        for _ in 0..attempts.max(1) {
            let path = &files[rng.gen_range(0..files.len())];
            match RuleFile::load(path) {
                Ok(file) => {
                    tracing::info!(path = %path.display(), "Rule loaded from library");
                    return Ok((path.clone(), file));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable rule");
                    last_error = Some(e);
                }
            }
        }

        let error = last_error.unwrap_or_else(|| IoError::invalid_rule("no rule loaded"));
        Err(error.with_context(format!("no loadable rule in {:?}", self.directory)))
    }
}
