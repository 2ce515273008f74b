//! Fixture set configuration
//!
//! A JSON file listing the fixtures to generate. When no file is given the
//! built-in pair is used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Fixture;
use crate::{Error, Result};

/// Set of fixtures to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Fixtures in output order
    pub fixtures: Vec<Fixture>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            fixtures: Fixture::builtin(),
        }
    }
}

impl FixtureConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if it lists
    /// no fixtures, if two fixtures share a name, or if any fixture fails
    /// [`Fixture::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            fixtures = config.fixtures.len(),
            "loaded fixture config"
        );
        Ok(config)
    }

    /// Validate every fixture and name uniqueness
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.fixtures.is_empty() {
            return Err(Error::Configuration(
                "config lists no fixtures".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for fixture in &self.fixtures {
            fixture.validate()?;
            if !seen.insert(fixture.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "duplicate fixture name `{}`",
                    fixture.name
                )));
            }
        }
        Ok(())
    }
}
