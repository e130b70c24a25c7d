//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Answer from the rule engine when the AI path fails.
    ///
    /// When off, upstream failures surface as 429 / 402 / 500.
    #[serde(default = "default_rules_fallback")]
    pub rules_fallback: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            rules_fallback: default_rules_fallback(),
        }
    }
}

fn default_rules_fallback() -> bool {
    true
}
