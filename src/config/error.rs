//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout: {0} must be greater than zero")]
    InvalidTimeout(&'static str),

    #[error("Invalid criterion weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Too many retries: {actual} exceeds the limit of {max}")]
    TooManyRetries { max: u32, actual: u32 },
}
