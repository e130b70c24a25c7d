//! Builds the outbound AI provider stack from configuration.
//!
//! ```text
//! Failover(Resilient(primary), Resilient(fallback))
//! ```
//!
//! Both resilient wrappers share one `CallPacer`, so failover traffic is
//! spaced against primary traffic. The failover wrapper stamps a single
//! deadline (`overall_budget`) that both tiers honor, so the AI stage as a
//! whole never outlives one budget.

use std::sync::Arc;

use super::{
    CallPacer, FailoverAIProvider, GatewayConfig, GatewayProvider, GeminiConfig, GeminiProvider,
    ResilientProvider,
};
use crate::config::{AiConfig, AiProvider};
use crate::ports::AIProvider;

/// Returns `None` when no credential is configured (rules-only mode).
pub fn provider_from_config(config: &AiConfig) -> Option<Arc<dyn AIProvider>> {
    if !config.is_configured() {
        tracing::info!("no AI credential configured, serving rule-based results only");
        return None;
    }

    let primary = http_provider(config, config.primary_provider)?;
    let fallback = config
        .fallback_provider
        .filter(|kind| *kind != config.primary_provider)
        .and_then(|kind| {
            let provider = http_provider(config, kind);
            if provider.is_none() {
                tracing::warn!(provider = ?kind, "fallback provider has no credential");
            }
            provider
        });

    Some(resilient_stack(primary, fallback, config))
}

/// Wraps raw providers in pacing, retries and one shared deadline.
pub fn resilient_stack(
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
    config: &AiConfig,
) -> Arc<dyn AIProvider> {
    let pacer = Arc::new(CallPacer::new(config.min_call_interval()));
    let resilient = |inner: Arc<dyn AIProvider>| -> Arc<dyn AIProvider> {
        Arc::new(
            ResilientProvider::new(inner, Arc::clone(&pacer))
                .with_policy(config.retry_policy())
                .with_budget(config.overall_budget()),
        )
    };

    let mut failover =
        FailoverAIProvider::new(resilient(primary)).with_budget(config.overall_budget());
    if let Some(fallback) = fallback {
        failover = failover.with_fallback(resilient(fallback));
    }
    Arc::new(failover)
}

fn http_provider(config: &AiConfig, kind: AiProvider) -> Option<Arc<dyn AIProvider>> {
    let key = config.api_key(kind)?;

    let inner: Arc<dyn AIProvider> = match kind {
        AiProvider::Gateway => Arc::new(GatewayProvider::new(
            GatewayConfig::new(key)
                .with_model(&config.gateway_model)
                .with_base_url(&config.gateway_base_url)
                .with_timeout(config.request_timeout()),
        )),
        AiProvider::Gemini => Arc::new(GeminiProvider::new(
            GeminiConfig::new(key)
                .with_model(&config.gemini_model)
                .with_base_url(&config.gemini_base_url)
                .with_timeout(config.request_timeout()),
        )),
    };

    let info = inner.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "AI provider configured");

    Some(inner)
}
