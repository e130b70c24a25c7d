//! AI-then-rules combinator shared by every reasoning handler.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use super::errors::ReasoningError;
use crate::domain::reasoning::Sourced;
use crate::ports::{AIProvider, Operation};

/// Runs the AI stage when a provider is configured and falls back to the
/// rule-based stage on any failure when `rules_fallback` is set.
#[derive(Clone)]
pub struct ReasoningPipeline {
    provider: Option<Arc<dyn AIProvider>>,
    rules_fallback: bool,
    rng: Arc<Mutex<StdRng>>,
}

impl ReasoningPipeline {
    pub fn new(provider: Option<Arc<dyn AIProvider>>, rules_fallback: bool) -> Self {
        Self {
            provider,
            rules_fallback,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Rule-based only, no AI provider.
    pub fn rules_only() -> Self {
        Self::new(None, true)
    }

    /// Fixes template selection for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn rules_fallback(&self) -> bool {
        self.rules_fallback
    }

    /// Runs `ai` against the provider, or `rules` when the AI stage is
    /// unavailable or fails and the fallback is enabled.
    pub async fn run<T, A, Fut, R>(
        &self,
        operation: Operation,
        ai: A,
        rules: R,
    ) -> Result<Sourced<T>, ReasoningError>
    where
        A: FnOnce(Arc<dyn AIProvider>) -> Fut,
        Fut: Future<Output = Result<T, ReasoningError>>,
        R: FnOnce(&mut StdRng) -> T,
    {
        let error = match &self.provider {
            Some(provider) => match ai(provider.clone()).await {
                Ok(data) => return Ok(Sourced::ai(data)),
                Err(err) => err,
            },
            None => ReasoningError::NotConfigured,
        };

        if !self.rules_fallback {
            tracing::warn!(
                operation = %operation,
                reason = error.kind(),
                error = %error,
                "AI stage failed, no fallback"
            );
            return Err(error);
        }

        match error {
            ReasoningError::NotConfigured => {
                tracing::debug!(operation = %operation, "no AI provider configured, using rules")
            }
            ref err => tracing::warn!(
                operation = %operation,
                reason = err.kind(),
                error = %err,
                "AI stage failed, falling back to rules"
            ),
        }

        Ok(Sourced::rules(self.with_rng(rules)))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::reasoning::Provenance;
    use rand::Rng;

    fn pipeline(mock: &MockAIProvider, rules_fallback: bool) -> ReasoningPipeline {
        ReasoningPipeline::new(Some(Arc::new(mock.clone())), rules_fallback).with_seed(1)
    }

    #[tokio::test]
    async fn ai_success_is_tagged_ai() {
        let mock = MockAIProvider::new();
        let result = pipeline(&mock, true)
            .run(Operation::GenerateQuestions, |_| async { Ok(1) }, |_| 2)
            .await
            .unwrap();
        assert_eq!(result.data, 1);
        assert_eq!(result.provenance, Provenance::Ai);
    }

    #[tokio::test]
    async fn ai_failure_falls_back_to_rules() {
        let mock = MockAIProvider::new();
        let result = pipeline(&mock, true)
            .run(
                Operation::GenerateQuestions,
                |_| async { Err(ReasoningError::RateLimited) },
                |_| 2,
            )
            .await
            .unwrap();
        assert_eq!(result.data, 2);
        assert_eq!(result.provenance, Provenance::Rules);
    }

    #[tokio::test]
    async fn ai_failure_surfaces_without_fallback() {
        let mock = MockAIProvider::new();
        let err = pipeline(&mock, false)
            .run::<i32, _, _, _>(
                Operation::GenerateQuestions,
                |_| async { Err(ReasoningError::PaymentRequired) },
                |_| 2,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ReasoningError::PaymentRequired);
    }

    #[tokio::test]
    async fn missing_provider_goes_straight_to_rules() {
        let result = ReasoningPipeline::rules_only()
            .run(
                Operation::ChallengeThinking,
                |_| async { Ok::<_, ReasoningError>(1) },
                |_| 2,
            )
            .await
            .unwrap();
        assert_eq!(result.data, 2);
        assert_eq!(result.provenance, Provenance::Rules);
    }

    #[tokio::test]
    async fn missing_provider_without_fallback_is_not_configured() {
        let err = ReasoningPipeline::new(None, false)
            .run(
                Operation::ChallengeThinking,
                |_| async { Ok::<_, ReasoningError>(1) },
                |_| 2,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ReasoningError::NotConfigured);
    }

    #[tokio::test]
    async fn seeded_pipelines_draw_identical_values() {
        let draw = |p: ReasoningPipeline| async move {
            p.run(
                Operation::GenerateExplanation,
                |_| async { Err::<u32, _>(ReasoningError::NotConfigured) },
                |rng| rng.gen::<u32>(),
            )
            .await
            .unwrap()
            .data
        };
        let a = draw(ReasoningPipeline::rules_only().with_seed(42)).await;
        let b = draw(ReasoningPipeline::rules_only().with_seed(42)).await;
        assert_eq!(a, b);
    }
}
