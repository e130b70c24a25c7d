//! GenerateQuestionsHandler - Clarifying questions about a decision.

use super::errors::ReasoningError;
use super::pipeline::ReasoningPipeline;
use super::prompts::{parse_questions, questions_request};
use crate::domain::foundation::ValidationError;
use crate::domain::reasoning::{RuleBasedReasoner, Sourced};
use crate::ports::Operation;

/// Command to generate questions for a decision.
#[derive(Debug, Clone)]
pub struct GenerateQuestionsCommand {
    pub decision_text: String,
}

/// Handler for clarifying-question generation.
#[derive(Clone)]
pub struct GenerateQuestionsHandler {
    pipeline: ReasoningPipeline,
}

impl GenerateQuestionsHandler {
    pub fn new(pipeline: ReasoningPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle(
        &self,
        cmd: GenerateQuestionsCommand,
    ) -> Result<Sourced<Vec<String>>, ReasoningError> {
        ValidationError::require("decision_text", Some(&cmd.decision_text))?;

        let request = questions_request(&cmd.decision_text);

        let result = self
            .pipeline
            .run(
                Operation::GenerateQuestions,
                |provider| async move {
                    let response = provider.complete(request).await?;
                    parse_questions(&response.content)
                },
                |rng| RuleBasedReasoner::questions(&cmd.decision_text, rng),
            )
            .await?;

        if result.data.is_empty() {
            return Err(ReasoningError::malformed("no questions could be generated"));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::reasoning::Provenance;
    use crate::ports::AIError;
    use std::sync::Arc;

    fn command(text: &str) -> GenerateQuestionsCommand {
        GenerateQuestionsCommand {
            decision_text: text.to_string(),
        }
    }

    fn handler(mock: &MockAIProvider, rules_fallback: bool) -> GenerateQuestionsHandler {
        GenerateQuestionsHandler::new(
            ReasoningPipeline::new(Some(Arc::new(mock.clone())), rules_fallback).with_seed(5),
        )
    }

    #[tokio::test]
    async fn parses_ai_questions() {
        let mock = MockAIProvider::new()
            .with_response("1. What prompted this now?\n2. What did you give up?\n3. Who else was involved?");
        let result = handler(&mock, true).handle(command("I moved cities")).await.unwrap();

        assert_eq!(result.provenance, Provenance::Ai);
        assert_eq!(result.data[0], "What prompted this now?");
        assert_eq!(result.data.len(), 3);
    }

    #[tokio::test]
    async fn unparseable_ai_output_uses_rules() {
        let mock = MockAIProvider::new().with_response("Sure! Here are some thoughts.");
        let result = handler(&mock, true)
            .handle(command("I am quitting my job to start a business"))
            .await
            .unwrap();

        assert_eq!(result.provenance, Provenance::Rules);
        assert_eq!(result.data.len(), 3);
        assert!(result.data.iter().all(|q| q.ends_with('?')));
    }

    #[tokio::test]
    async fn unparseable_ai_output_without_fallback_is_malformed() {
        let mock = MockAIProvider::new().with_response("No questions.");
        let err = handler(&mock, false).handle(command("I moved")).await.unwrap_err();
        assert!(matches!(err, ReasoningError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn rate_limited_falls_back_to_rules() {
        let mock = MockAIProvider::new().with_error(AIError::RateLimited);
        let result = handler(&mock, true).handle(command("I bought a car")).await.unwrap();
        assert_eq!(result.provenance, Provenance::Rules);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let err = GenerateQuestionsHandler::new(ReasoningPipeline::rules_only())
            .handle(command(""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "decision_text is required");
    }
}
