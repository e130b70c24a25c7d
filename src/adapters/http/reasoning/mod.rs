//! HTTP adapter for reasoning endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalyzeExplanationRequest, AnswerDto, ChallengeThinkingRequest, ErrorResponse,
    ExplanationResponse, GenerateExplanationRequest, GenerateQuestionsRequest, HealthResponse,
    QuestionsResponse, SourcedResponse,
};
pub use handlers::{JsonBody, ReasoningApiError, ReasoningHandlers};
pub use routes::{app_router, cors_layer, reasoning_routes};
