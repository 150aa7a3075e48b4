//! Clustering configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Art2aError, Art2aResult};
use super::{DEFAULT_LEARNING_RATE, DEFAULT_MAX_EPOCHS};

/// Parameters of an ART-2A clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Art2aConfig {
    /// Similarity threshold in (0, 1). Higher values give finer clustering.
    pub vigilance: f64,
    /// Maximum number of epochs before the run is declared non-convergent.
    #[serde(default = "default_max_epochs")]
    pub max_epochs: usize,
    /// Weight of the presented vector when a cluster vector is updated.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_max_epochs() -> usize {
    DEFAULT_MAX_EPOCHS
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl Default for Art2aConfig {
    fn default() -> Self {
        Self {
            vigilance: 0.1,
            max_epochs: default_max_epochs(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl Art2aConfig {
    /// Create a configuration with the given vigilance and default remaining parameters.
    pub fn new(vigilance: f64) -> Self {
        Self {
            vigilance,
            ..Self::default()
        }
    }

    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> Art2aResult<()> {
        if !(self.vigilance > 0.0 && self.vigilance < 1.0) {
            return Err(Art2aError::InvalidVigilance(self.vigilance));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Art2aError::InvalidLearningRate(self.learning_rate));
        }
        if self.max_epochs == 0 {
            return Err(Art2aError::InvalidEpochBudget(self.max_epochs));
        }
        Ok(())
    }
}

/// Load and validate a configuration from a JSON file.
pub fn load_config(path: &Path) -> Art2aResult<Art2aConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Art2aError::Config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    let config: Art2aConfig = serde_json::from_str(&content)
        .map_err(|e| Art2aError::Config(format!("Failed to parse config: {e}")))?;
    config.validate()?;
    Ok(config)
}
