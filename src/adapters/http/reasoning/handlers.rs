//! HTTP handlers for reasoning endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::application::handlers::reasoning::{
    AnalyzeExplanationHandler, ChallengeThinkingHandler, GenerateExplanationHandler,
    GenerateQuestionsHandler, ReasoningError, ReasoningPipeline,
};

use super::dto::{
    AnalyzeExplanationRequest, ChallengeThinkingRequest, ErrorResponse, ExplanationResponse,
    GenerateExplanationRequest, GenerateQuestionsRequest, HealthResponse, QuestionsResponse,
    SourcedResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReasoningHandlers {
    analyze_handler: Arc<AnalyzeExplanationHandler>,
    challenge_handler: Arc<ChallengeThinkingHandler>,
    questions_handler: Arc<GenerateQuestionsHandler>,
    explanation_handler: Arc<GenerateExplanationHandler>,
}

impl ReasoningHandlers {
    pub fn new(
        analyze_handler: Arc<AnalyzeExplanationHandler>,
        challenge_handler: Arc<ChallengeThinkingHandler>,
        questions_handler: Arc<GenerateQuestionsHandler>,
        explanation_handler: Arc<GenerateExplanationHandler>,
    ) -> Self {
        Self {
            analyze_handler,
            challenge_handler,
            questions_handler,
            explanation_handler,
        }
    }

    /// All four handlers sharing one pipeline.
    pub fn from_pipeline(pipeline: ReasoningPipeline) -> Self {
        Self::new(
            Arc::new(AnalyzeExplanationHandler::new(pipeline.clone())),
            Arc::new(ChallengeThinkingHandler::new(pipeline.clone())),
            Arc::new(GenerateQuestionsHandler::new(pipeline.clone())),
            Arc::new(GenerateExplanationHandler::new(pipeline)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request body extractor
// ════════════════════════════════════════════════════════════════════════════

/// JSON body extractor whose rejection is a 400 `{error}` response.
///
/// The content type is not checked.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ReasoningApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ReasoningApiError::bad_request(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ReasoningApiError::bad_request(format!("Invalid JSON body: {}", e)))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /analyze-explanation - Score and explain a user's reasoning
pub async fn analyze_explanation(
    State(handlers): State<ReasoningHandlers>,
    JsonBody(req): JsonBody<AnalyzeExplanationRequest>,
) -> Result<Response, ReasoningApiError> {
    let result = handlers.analyze_handler.handle(req.into()).await?;
    Ok((StatusCode::OK, Json(SourcedResponse::from(result))).into_response())
}

/// POST /challenge-thinking - Challenge a line of reasoning
pub async fn challenge_thinking(
    State(handlers): State<ReasoningHandlers>,
    JsonBody(req): JsonBody<ChallengeThinkingRequest>,
) -> Result<Response, ReasoningApiError> {
    let result = handlers.challenge_handler.handle(req.into()).await?;
    Ok((StatusCode::OK, Json(SourcedResponse::from(result))).into_response())
}

/// POST /generate-questions - Clarifying questions about a decision
pub async fn generate_questions(
    State(handlers): State<ReasoningHandlers>,
    JsonBody(req): JsonBody<GenerateQuestionsRequest>,
) -> Result<Response, ReasoningApiError> {
    let result = handlers.questions_handler.handle(req.into()).await?;
    let response = SourcedResponse::from(result.map(|questions| QuestionsResponse { questions }));
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// POST /generate-explanation - Neutral explanation of a decision
pub async fn generate_explanation(
    State(handlers): State<ReasoningHandlers>,
    JsonBody(req): JsonBody<GenerateExplanationRequest>,
) -> Result<Response, ReasoningApiError> {
    let result = handlers.explanation_handler.handle(req.into()).await?;
    let response =
        SourcedResponse::from(result.map(|explanation| ExplanationResponse { explanation }));
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// HTTP-facing error: a status and a client-safe message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ReasoningApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ReasoningError> for ReasoningApiError {
    fn from(error: ReasoningError) -> Self {
        match error {
            ReasoningError::Validation(err) => Self::bad_request(err.to_string()),
            ReasoningError::RateLimited => Self::new(
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limits exceeded, please try again later.",
            ),
            ReasoningError::PaymentRequired => Self::new(
                StatusCode::PAYMENT_REQUIRED,
                "Payment required, please add credits to continue.",
            ),
            ReasoningError::NotConfigured => {
                tracing::error!("AI provider is not configured and rules fallback is disabled");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "AI service is not configured")
            }
            ReasoningError::MalformedOutput(detail) => {
                tracing::error!(detail = %detail, "malformed AI output");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Invalid response from AI service")
            }
            ReasoningError::Upstream(detail) => {
                tracing::error!(detail = %detail, "AI service failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "AI service error")
            }
        }
    }
}

impl IntoResponse for ReasoningApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
