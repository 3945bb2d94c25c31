//! Ranking engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::mcda::{CriteriaConfig, McdaError, WeightUpdate};

/// Ranking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct McdaConfig {
    /// Weight overrides applied over the defaults at startup
    #[serde(default)]
    pub weights: WeightUpdate,

    /// Upper bound on generated recommendation text, in seconds
    #[serde(default = "default_recommendation_timeout")]
    pub recommendation_timeout_secs: u64,
}

impl McdaConfig {
    pub fn recommendation_timeout(&self) -> Duration {
        Duration::from_secs(self.recommendation_timeout_secs)
    }

    /// Initial criteria configuration: defaults with the overrides applied.
    pub fn criteria_config(&self) -> Result<CriteriaConfig, McdaError> {
        let mut config = CriteriaConfig::default();
        config.update_weights(self.weights)?;
        Ok(config)
    }

    /// Validate ranking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.criteria_config()
            .map_err(|e| ValidationError::InvalidWeights(e.to_string()))?;

        if self.recommendation_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout(
                "mcda.recommendation_timeout_secs",
            ));
        }

        Ok(())
    }
}

impl Default for McdaConfig {
    fn default() -> Self {
        Self {
            weights: WeightUpdate::default(),
            recommendation_timeout_secs: default_recommendation_timeout(),
        }
    }
}

fn default_recommendation_timeout() -> u64 {
    20
}
