//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails with a retryable error (rate limit,
//! unavailable, network, timeout), the secondary provider is tried if one is
//! configured. Terminal errors such as payment required are returned as is.
//!
//! With a budget, one deadline is stamped on the request before the primary
//! is called. Both tiers share it, and the secondary is skipped once it has
//! passed.
//!
//! # Example
//!
//! ```ignore
//! let provider = FailoverAIProvider::new(gateway)
//!     .with_fallback(gemini)
//!     .with_budget(Duration::from_secs(15));
//! ```

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// AI provider wrapper with optional secondary provider.
pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
    budget: Option<Duration>,
}

impl FailoverAIProvider {
    /// Creates a failover provider with only a primary provider.
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
            budget: None,
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Bounds both tiers together by one wall-clock budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Runs a tier call, cut off at the deadline when there is one.
async fn within_deadline<F>(deadline: Option<Instant>, call: F) -> Result<CompletionResponse, AIError>
where
    F: Future<Output = Result<CompletionResponse, AIError>>,
{
    let Some(deadline) = deadline else {
        return call.await;
    };
    let remaining_ms = deadline.saturating_duration_since(Instant::now()).as_millis() as u64;
    timeout_at(deadline, call).await.unwrap_or(Err(AIError::Timeout {
        timeout_ms: remaining_ms,
    }))
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, mut request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        if let Some(budget) = self.budget {
            request.metadata.tighten_deadline(Instant::now() + budget);
        }
        let deadline = request.metadata.deadline;

        let err = match within_deadline(deadline, self.primary.complete(request.clone())).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        match &self.fallback {
            Some(_) if deadline.is_some_and(|d| Instant::now() >= d) => {
                tracing::warn!(
                    primary = %self.primary.provider_info().name,
                    reason = %err,
                    trace_id = %request.metadata.trace_id,
                    "AI deadline reached, skipping failover"
                );
                Err(err)
            }
            Some(fallback) if err.is_retryable() => {
                tracing::warn!(
                    primary = %self.primary.provider_info().name,
                    fallback = %fallback.provider_info().name,
                    reason = %err,
                    trace_id = %request.metadata.trace_id,
                    "AI provider failover"
                );
                within_deadline(deadline, fallback.complete(request)).await
            }
            _ => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}
