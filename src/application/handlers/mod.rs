//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and AI ports.

pub mod reasoning;

pub use reasoning::{
    AnalyzeExplanationCommand, AnalyzeExplanationHandler, ChallengeThinkingCommand,
    ChallengeThinkingHandler, GenerateExplanationCommand, GenerateExplanationHandler,
    GenerateQuestionsCommand, GenerateQuestionsHandler, Language, ReasoningError,
    ReasoningPipeline,
};
