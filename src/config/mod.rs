//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COOP_MCDA` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use coop_mcda::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod features;
mod mcda;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use mcda::McdaConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ranking configuration (weight overrides, recommendation timeout)
    #[serde(default)]
    pub mcda: McdaConfig,

    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COOP_MCDA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COOP_MCDA__MCDA__WEIGHTS__TOTAL_SAVINGS=0.3` -> `mcda.weights.total_savings = 0.3`
    /// - `COOP_MCDA__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    /// - `COOP_MCDA__FEATURES__ENABLE_LLM_RECOMMENDATIONS=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COOP_MCDA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// - Weight overrides must produce a valid weight set
    /// - Timeouts must be non-zero
    /// - AI settings are only checked when LLM recommendations are enabled
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.mcda.validate()?;
        if self.features.enable_llm_recommendations {
            self.ai.validate()?;
        }
        Ok(())
    }

    /// Whether generated recommendation text should be requested
    pub fn llm_recommendations_enabled(&self) -> bool {
        self.features.enable_llm_recommendations && self.ai.has_openai()
    }
}
