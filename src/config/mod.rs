//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DECISION_LENS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use decision_lens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod features;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a rules-only
/// server on `0.0.0.0:8080`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (gateway/Gemini)
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
    /// 2. Reads environment variables with `DECISION_LENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DECISION_LENS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DECISION_LENS__AI__GATEWAY_API_KEY=...` -> `ai.gateway_api_key = ...`
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
                    .prefix("DECISION_LENS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        // The rules fallback needs time left after the AI stage gives up.
        if self.server.request_timeout_secs <= self.ai.overall_budget_secs {
            return Err(ValidationError::RequestTimeoutWithinAiBudget);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "DECISION_LENS__SERVER__PORT",
        "DECISION_LENS__SERVER__ENVIRONMENT",
        "DECISION_LENS__AI__GATEWAY_API_KEY",
        "DECISION_LENS__AI__PRIMARY_PROVIDER",
        "DECISION_LENS__AI__MAX_RETRIES",
        "DECISION_LENS__FEATURES__RULES_FALLBACK",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.ai.is_configured());
        assert!(config.features.rules_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_LENS__AI__GATEWAY_API_KEY", "gw-xxx");
        env::set_var("DECISION_LENS__AI__MAX_RETRIES", "1");
        env::set_var("DECISION_LENS__FEATURES__RULES_FALLBACK", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.api_key(AiProvider::Gateway), Some("gw-xxx"));
        assert_eq!(config.ai.max_retries, 1);
        assert!(!config.features.rules_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_LENS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_LENS__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }

    #[test]
    fn test_request_timeout_must_exceed_ai_budget() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.server.request_timeout_secs = config.ai.overall_budget_secs;
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutWithinAiBudget)
        );
    }

    #[test]
    fn test_missing_primary_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_LENS__AI__GATEWAY_API_KEY", "gw-xxx");
        env::set_var("DECISION_LENS__AI__PRIMARY_PROVIDER", "gemini");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
    }
}
