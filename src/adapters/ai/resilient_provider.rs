//! Resilient AI Provider - pacing, retry with backoff, and an overall deadline.
//!
//! ```ignore
//! let provider = ResilientProvider::new(Arc::new(GatewayProvider::new(config)), pacer)
//!     .with_policy(RetryPolicy::default())
//!     .with_budget(Duration::from_secs(15));
//! ```
//!
//! Every attempt first waits its turn on the shared `CallPacer`. Retryable
//! failures are retried per the `RetryPolicy`; anything else returns at once.
//! The whole sequence, waits included, is bounded by the budget or by an
//! earlier deadline already stamped on the request. When the deadline cuts a
//! retry sequence short, the last upstream error is returned so a rate limit
//! stays a rate limit.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};

use super::pacer::CallPacer;
use super::retry::RetryPolicy;
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

pub struct ResilientProvider {
    inner: Arc<dyn AIProvider>,
    pacer: Arc<CallPacer>,
    policy: RetryPolicy,
    budget: Duration,
}

impl ResilientProvider {
    pub fn new(inner: Arc<dyn AIProvider>, pacer: Arc<CallPacer>) -> Self {
        Self {
            inner,
            pacer,
            policy: RetryPolicy::default(),
            budget: Duration::from_secs(15),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    async fn run(
        &self,
        request: CompletionRequest,
        last_failure: &mut Option<AIError>,
    ) -> Result<CompletionResponse, AIError> {
        let provider = self.inner.provider_info().name;
        let mut attempt: u32 = 0;

        loop {
            self.pacer.wait_turn().await;

            match self.inner.complete(request.clone()).await {
                Ok(response) => {
                    tracing::debug!(
                        provider = %provider,
                        attempt,
                        operation = %request.metadata.operation,
                        trace_id = %request.metadata.trace_id,
                        "AI call succeeded"
                    );
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && self.policy.should_retry(attempt) => {
                    let delay = self.policy.backoff(attempt, &mut rand::thread_rng());
                    tracing::warn!(
                        provider = %provider,
                        attempt,
                        status = ?err.status(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retryable AI failure, backing off"
                    );
                    *last_failure = Some(err);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        provider = %provider,
                        attempt,
                        status = ?err.status(),
                        error = %err,
                        "AI call failed"
                    );
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl AIProvider for ResilientProvider {
    async fn complete(&self, mut request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let start = Instant::now();
        let deadline = request.metadata.tighten_deadline(start + self.budget);
        let budget_ms = deadline.saturating_duration_since(start).as_millis() as u64;

        let mut last_failure = None;
        let outcome = timeout_at(deadline, self.run(request, &mut last_failure)).await;

        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    provider = %self.inner.provider_info().name,
                    budget_ms,
                    last_error = ?last_failure,
                    "AI call budget exhausted"
                );
                Err(last_failure.unwrap_or(AIError::Timeout {
                    timeout_ms: budget_ms,
                }))
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.inner.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::ports::{MessageRole, Operation, RequestMetadata};

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(Operation::AnalyzeExplanation))
            .with_message(MessageRole::User, "Hello")
    }

    fn resilient(mock: &MockAIProvider, min_interval: Duration) -> ResilientProvider {
        ResilientProvider::new(
            Arc::new(mock.clone()),
            Arc::new(CallPacer::new(min_interval)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt() {
        let mock = MockAIProvider::new().with_response("ok");
        let provider = resilient(&mock, Duration::ZERO);

        assert_eq!(provider.complete(request()).await.unwrap().content, "ok");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_then_succeeds() {
        let mock = MockAIProvider::new()
            .with_error(AIError::RateLimited)
            .with_error(AIError::Unavailable { status: 503 })
            .with_response("ok");
        let provider = resilient(&mock, Duration::ZERO);

        assert_eq!(provider.complete(request()).await.unwrap().content, "ok");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries_with_last_error() {
        let mock = MockAIProvider::new()
            .with_errors(AIError::RateLimited, 4)
            .with_response("never reached");
        let provider = resilient(&mock, Duration::ZERO).with_budget(Duration::from_secs(60));

        assert_eq!(provider.complete(request()).await.unwrap_err(), AIError::RateLimited);
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn payment_required_is_not_retried() {
        let mock = MockAIProvider::new()
            .with_error(AIError::PaymentRequired)
            .with_response("never reached");
        let provider = resilient(&mock, Duration::ZERO);

        assert_eq!(provider.complete(request()).await.unwrap_err(), AIError::PaymentRequired);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_delays_grow_between_attempts() {
        let mock = MockAIProvider::new()
            .with_errors(AIError::Unavailable { status: 502 }, 2)
            .with_response("ok");
        let provider = resilient(&mock, Duration::ZERO).with_budget(Duration::from_secs(60));

        let start = Instant::now();
        provider.complete(request()).await.unwrap();
        // 1000ms and 2000ms nominal, each at least 75% after jitter.
        assert!(start.elapsed() >= Duration::from_millis(2250));
        assert!(start.elapsed() <= Duration::from_millis(3750));
    }

    #[tokio::test(start_paused = true)]
    async fn each_attempt_is_paced() {
        let mock = MockAIProvider::new()
            .with_error(AIError::network("reset"))
            .with_response("ok");
        let provider = resilient(&mock, Duration::from_millis(4000))
            .with_policy(RetryPolicy::default().with_base_delay(Duration::from_millis(100)));

        let start = Instant::now();
        provider.complete(request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn overall_budget_bounds_the_call() {
        let mock = MockAIProvider::new().with_delay(Duration::from_secs(20));
        let provider = resilient(&mock, Duration::ZERO).with_budget(Duration::from_secs(15));

        let start = Instant::now();
        let err = provider.complete(request()).await.unwrap_err();
        assert_eq!(err, AIError::Timeout { timeout_ms: 15_000 });
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn budget_cut_during_rate_limit_retries_stays_rate_limited() {
        // Each attempt takes 1.5s and is paced 4s apart, so the fourth attempt
        // cannot finish inside 15s.
        let mock = MockAIProvider::new()
            .with_errors(AIError::RateLimited, 4)
            .with_delay(Duration::from_millis(1500));
        let provider = resilient(&mock, Duration::from_millis(4000))
            .with_policy(RetryPolicy::default().with_base_delay(Duration::from_secs(4)))
            .with_budget(Duration::from_secs(15));

        let start = Instant::now();
        let err = provider.complete(request()).await.unwrap_err();
        assert_eq!(err, AIError::RateLimited);
        assert_eq!(start.elapsed(), Duration::from_secs(15));
        assert!(mock.call_count() < 4);
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_request_deadline_wins_over_budget() {
        let mock = MockAIProvider::new().with_delay(Duration::from_secs(20));
        let provider = resilient(&mock, Duration::ZERO).with_budget(Duration::from_secs(15));

        let mut req = request();
        req.metadata = req
            .metadata
            .with_deadline(Instant::now() + Duration::from_secs(5));

        let start = Instant::now();
        let err = provider.complete(req).await.unwrap_err();
        assert_eq!(err, AIError::Timeout { timeout_ms: 5_000 });
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn reports_inner_provider_info() {
        let mock = MockAIProvider::new();
        assert_eq!(resilient(&mock, Duration::ZERO).provider_info().name, "mock");
    }
}
