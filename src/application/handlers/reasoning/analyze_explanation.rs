//! AnalyzeExplanationHandler - Scores and explains a user's reasoning.

use super::errors::ReasoningError;
use super::pipeline::ReasoningPipeline;
use super::prompts::{analysis_request, parse_analysis, Language};
use crate::domain::foundation::ValidationError;
use crate::domain::reasoning::{AnalysisResult, RuleBasedReasoner, Sourced};
use crate::ports::Operation;

/// Command to analyze an answer to a question.
#[derive(Debug, Clone)]
pub struct AnalyzeExplanationCommand {
    pub question: String,
    pub answer: String,
    pub language: Language,
    pub subject: Option<String>,
}

/// Handler for reasoning analysis.
#[derive(Clone)]
pub struct AnalyzeExplanationHandler {
    pipeline: ReasoningPipeline,
}

impl AnalyzeExplanationHandler {
    pub fn new(pipeline: ReasoningPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeExplanationCommand,
    ) -> Result<Sourced<AnalysisResult>, ReasoningError> {
        ValidationError::require("question", Some(&cmd.question))?;
        ValidationError::require("answer", Some(&cmd.answer))?;

        let request = analysis_request(&cmd.question, &cmd.answer, cmd.language, cmd.subject.as_deref());

        self.pipeline
            .run(
                Operation::AnalyzeExplanation,
                |provider| async move {
                    let response = provider.complete(request).await?;
                    parse_analysis(&response.content)
                },
                |rng| RuleBasedReasoner::analyze(&cmd.question, &cmd.answer, rng),
            )
            .await
    }
}
