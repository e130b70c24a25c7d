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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI overall budget must be at least the per-request timeout")]
    BudgetShorterThanRequest,

    #[error("Server request timeout must exceed the AI overall budget")]
    RequestTimeoutWithinAiBudget,

    #[error("AI retry max delay must be at least the base delay")]
    InvalidRetryDelays,

    #[error("Fallback provider must differ from the primary provider")]
    FallbackSameAsPrimary,
}
