//! Reasoning handlers - one per endpoint.
//!
//! Each handler validates its command, then runs an AI-then-rules pipeline:
//! the AI stage builds a prompt and parses the completion, the rules stage
//! runs the deterministic `RuleBasedReasoner`. Results carry provenance.

mod analyze_explanation;
mod challenge_thinking;
mod errors;
mod generate_explanation;
mod generate_questions;
mod pipeline;
mod prompts;

pub use analyze_explanation::{AnalyzeExplanationCommand, AnalyzeExplanationHandler};
pub use challenge_thinking::{ChallengeThinkingCommand, ChallengeThinkingHandler};
pub use errors::ReasoningError;
pub use generate_explanation::{
    GenerateExplanationCommand, GenerateExplanationHandler, MAX_GENERATION_ATTEMPTS,
};
pub use generate_questions::{GenerateQuestionsCommand, GenerateQuestionsHandler};
pub use pipeline::ReasoningPipeline;
pub use prompts::{
    parse_analysis, parse_challenge, parse_explanation, parse_questions, strip_code_fence,
    Language,
};
