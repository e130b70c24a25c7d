//! GenerateExplanationHandler - Neutral explanation of why a decision was made.
//!
//! AI output is checked against the advisory-language filter and regenerated
//! up to `MAX_GENERATION_ATTEMPTS` times. If every attempt trips the filter,
//! the last text is returned as is.

use std::sync::Arc;

use super::errors::ReasoningError;
use super::pipeline::ReasoningPipeline;
use super::prompts::{explanation_request, parse_explanation};
use crate::domain::foundation::ValidationError;
use crate::domain::reasoning::{find_advisory_phrase, Answer, RuleBasedReasoner, Sourced};
use crate::ports::{AIProvider, CompletionRequest, Operation};

/// Upper bound on AI generations per request.
pub const MAX_GENERATION_ATTEMPTS: usize = 3;

/// Command to explain a decision.
#[derive(Debug, Clone)]
pub struct GenerateExplanationCommand {
    pub decision_text: String,
    pub answers: Vec<Answer>,
}

/// Handler for decision explanations.
#[derive(Clone)]
pub struct GenerateExplanationHandler {
    pipeline: ReasoningPipeline,
}

impl GenerateExplanationHandler {
    pub fn new(pipeline: ReasoningPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle(
        &self,
        cmd: GenerateExplanationCommand,
    ) -> Result<Sourced<String>, ReasoningError> {
        ValidationError::require("decision_text", Some(&cmd.decision_text))?;

        let request = explanation_request(&cmd.decision_text, &cmd.answers);

        self.pipeline
            .run(
                Operation::GenerateExplanation,
                |provider| generate_filtered(provider, request),
                |rng| RuleBasedReasoner::explain(&cmd.decision_text, &cmd.answers, rng),
            )
            .await
    }
}

async fn generate_filtered(
    provider: Arc<dyn AIProvider>,
    request: CompletionRequest,
) -> Result<String, ReasoningError> {
    let mut explanation = String::new();

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let response = provider.complete(request.clone()).await?;
        explanation = parse_explanation(&response.content)?;

        match find_advisory_phrase(&explanation) {
            None => break,
            Some(phrase) => tracing::info!(
                attempt,
                phrase,
                trace_id = %request.metadata.trace_id,
                "explanation contained advisory language, regenerating"
            ),
        }
    }

    Ok(explanation)
}
