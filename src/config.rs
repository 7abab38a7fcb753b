//! Generator configuration.
//!
//! Loaded by the embedding service (typically from JSON alongside its
//! own settings) and passed to [`DutyGenerator`](crate::generation::DutyGenerator).

use serde::{Deserialize, Serialize};

/// Settings that shape every generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Longest accepted target range in days.
    pub max_range_days: u32,
    /// Seed used when a request carries none. `None` = draw from the clock.
    pub default_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_range_days: 366,
            default_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the maximum range length.
    pub fn with_max_range_days(mut self, days: u32) -> Self {
        self.max_range_days = days;
        self
    }

    /// Sets the fallback seed.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }
}
