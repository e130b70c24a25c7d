//! HTTP DTOs for reasoning endpoints.
//!
//! Request fields are optional at the serde level so that a missing field is
//! reported as a 400 validation error rather than a deserialization failure.

use serde::{Deserialize, Serialize};

use crate::application::handlers::reasoning::{
    AnalyzeExplanationCommand, ChallengeThinkingCommand, GenerateExplanationCommand,
    GenerateQuestionsCommand, Language,
};
use crate::domain::reasoning::{Answer, Provenance, Sourced};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeExplanationRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub language: Option<String>,
    pub subject: Option<String>,
}

impl From<AnalyzeExplanationRequest> for AnalyzeExplanationCommand {
    fn from(req: AnalyzeExplanationRequest) -> Self {
        Self {
            question: req.question.unwrap_or_default(),
            answer: req.answer.unwrap_or_default(),
            language: Language::from_code(req.language.as_deref()),
            subject: req.subject,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChallengeThinkingRequest {
    pub problem_statement: Option<String>,
    pub user_reasoning: Option<String>,
    pub user_conclusion: Option<String>,
}

impl From<ChallengeThinkingRequest> for ChallengeThinkingCommand {
    fn from(req: ChallengeThinkingRequest) -> Self {
        Self {
            problem_statement: req.problem_statement.unwrap_or_default(),
            user_reasoning: req.user_reasoning.unwrap_or_default(),
            user_conclusion: req.user_conclusion.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateQuestionsRequest {
    pub decision_text: Option<String>,
}

impl From<GenerateQuestionsRequest> for GenerateQuestionsCommand {
    fn from(req: GenerateQuestionsRequest) -> Self {
        Self {
            decision_text: req.decision_text.unwrap_or_default(),
        }
    }
}

/// A question/answer pair as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnswerDto {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateExplanationRequest {
    pub decision_text: Option<String>,
    pub answers: Option<Vec<AnswerDto>>,
}

impl From<GenerateExplanationRequest> for GenerateExplanationCommand {
    fn from(req: GenerateExplanationRequest) -> Self {
        Self {
            decision_text: req.decision_text.unwrap_or_default(),
            answers: req
                .answers
                .unwrap_or_default()
                .into_iter()
                .map(|a| Answer::new(a.question, a.answer))
                .collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Payload fields plus a `_source` provenance tag.
#[derive(Debug, Clone, Serialize)]
pub struct SourcedResponse<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "_source")]
    pub source: Provenance,
}

impl<T> From<Sourced<T>> for SourcedResponse<T> {
    fn from(sourced: Sourced<T>) -> Self {
        Self {
            data: sourced.data,
            source: sourced.provenance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body returned for every failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
