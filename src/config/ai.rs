//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{
    RetryPolicy, DEFAULT_GATEWAY_BASE_URL, DEFAULT_GATEWAY_MODEL, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL,
};

/// AI provider configuration
///
/// No credential at all is a valid configuration: every endpoint then answers
/// from the rule engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible gateway API key
    pub gateway_api_key: Option<String>,

    /// Google Gemini API key
    pub gemini_api_key: Option<String>,

    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: AiProvider,

    /// Fallback AI provider, tried on retryable primary failures
    pub fallback_provider: Option<AiProvider>,

    #[serde(default = "default_gateway_model")]
    pub gateway_model: String,

    #[serde(default = "default_gateway_base_url")]
    pub gateway_base_url: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Deadline for one provider call including retries, in seconds
    #[serde(default = "default_overall_budget")]
    pub overall_budget_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay")]
    pub retry_max_delay_ms: u64,

    /// Minimum spacing between outbound calls, in milliseconds
    #[serde(default = "default_min_call_interval")]
    pub min_call_interval_ms: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gateway,
    Gemini,
}

impl AiProvider {
    fn key_name(self) -> &'static str {
        match self {
            AiProvider::Gateway => "GATEWAY_API_KEY",
            AiProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl AiConfig {
    /// API key for a provider, if a non-empty one is configured
    pub fn api_key(&self, provider: AiProvider) -> Option<&str> {
        let key = match provider {
            AiProvider::Gateway => self.gateway_api_key.as_deref(),
            AiProvider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    /// Check if any credential is configured
    pub fn is_configured(&self) -> bool {
        self.api_key(AiProvider::Gateway).is_some() || self.api_key(AiProvider::Gemini).is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn overall_budget(&self) -> Duration {
        Duration::from_secs(self.overall_budget_secs)
    }

    pub fn min_call_interval(&self) -> Duration {
        Duration::from_millis(self.min_call_interval_ms)
    }

    /// Retry policy built from the configured limits
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_base_delay(Duration::from_millis(self.retry_base_delay_ms))
            .with_max_delay(Duration::from_millis(self.retry_max_delay_ms))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.overall_budget_secs < self.request_timeout_secs {
            return Err(ValidationError::BudgetShorterThanRequest);
        }
        if self.retry_max_delay_ms < self.retry_base_delay_ms {
            return Err(ValidationError::InvalidRetryDelays);
        }

        // Rules-only mode
        if !self.is_configured() {
            return Ok(());
        }

        if self.api_key(self.primary_provider).is_none() {
            return Err(ValidationError::MissingRequired(
                self.primary_provider.key_name(),
            ));
        }

        if let Some(fallback) = self.fallback_provider {
            if fallback == self.primary_provider {
                return Err(ValidationError::FallbackSameAsPrimary);
            }
            if self.api_key(fallback).is_none() {
                return Err(ValidationError::MissingRequired(fallback.key_name()));
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gateway_api_key: None,
            gemini_api_key: None,
            primary_provider: default_provider(),
            fallback_provider: None,
            gateway_model: default_gateway_model(),
            gateway_base_url: default_gateway_base_url(),
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            request_timeout_secs: default_request_timeout(),
            overall_budget_secs: default_overall_budget(),
            max_retries: default_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
            retry_max_delay_ms: default_retry_max_delay(),
            min_call_interval_ms: default_min_call_interval(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::Gateway
}

fn default_gateway_model() -> String {
    DEFAULT_GATEWAY_MODEL.to_string()
}

fn default_gateway_base_url() -> String {
    DEFAULT_GATEWAY_BASE_URL.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_overall_budget() -> u64 {
    15
}

fn default_retries() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    1000
}

fn default_retry_max_delay() -> u64 {
    30_000
}

fn default_min_call_interval() -> u64 {
    4000
}
