//! ChallengeThinkingHandler - Surfaces flaws and biases in a line of reasoning.

use super::errors::ReasoningError;
use super::pipeline::ReasoningPipeline;
use super::prompts::{challenge_request, parse_challenge};
use crate::domain::foundation::ValidationError;
use crate::domain::reasoning::{ChallengeResult, RuleBasedReasoner, Sourced};
use crate::ports::Operation;

/// Command to challenge a problem/reasoning/conclusion triple.
#[derive(Debug, Clone)]
pub struct ChallengeThinkingCommand {
    pub problem_statement: String,
    pub user_reasoning: String,
    pub user_conclusion: String,
}

/// Handler for thinking challenges.
#[derive(Clone)]
pub struct ChallengeThinkingHandler {
    pipeline: ReasoningPipeline,
}

impl ChallengeThinkingHandler {
    pub fn new(pipeline: ReasoningPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle(
        &self,
        cmd: ChallengeThinkingCommand,
    ) -> Result<Sourced<ChallengeResult>, ReasoningError> {
        ValidationError::require("problem_statement", Some(&cmd.problem_statement))?;
        ValidationError::require("user_reasoning", Some(&cmd.user_reasoning))?;
        ValidationError::require("user_conclusion", Some(&cmd.user_conclusion))?;

        let request = challenge_request(
            &cmd.problem_statement,
            &cmd.user_reasoning,
            &cmd.user_conclusion,
        );

        self.pipeline
            .run(
                Operation::ChallengeThinking,
                |provider| async move {
                    let response = provider.complete(request).await?;
                    parse_challenge(&response.content)
                },
                |_| {
                    RuleBasedReasoner::challenge(
                        &cmd.problem_statement,
                        &cmd.user_reasoning,
                        &cmd.user_conclusion,
                    )
                },
            )
            .await
    }
}
