//! Use-case level errors for the reasoning handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::AIError;

/// Errors surfaced by the reasoning handlers.
///
/// With the rules fallback enabled only `Validation` reaches callers;
/// everything else is absorbed by the rule-based pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReasoningError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("rate limited by AI provider")]
    RateLimited,

    #[error("AI provider requires payment")]
    PaymentRequired,

    #[error("AI provider is not configured")]
    NotConfigured,

    #[error("malformed AI output: {0}")]
    MalformedOutput(String),

    #[error("AI provider failure: {0}")]
    Upstream(String),
}

impl ReasoningError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOutput(reason.into())
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ReasoningError::Validation(_) => "validation",
            ReasoningError::RateLimited => "rate_limited",
            ReasoningError::PaymentRequired => "payment_required",
            ReasoningError::NotConfigured => "not_configured",
            ReasoningError::MalformedOutput(_) => "malformed_output",
            ReasoningError::Upstream(_) => "upstream",
        }
    }
}

impl From<AIError> for ReasoningError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::RateLimited => ReasoningError::RateLimited,
            AIError::PaymentRequired => ReasoningError::PaymentRequired,
            AIError::NotConfigured => ReasoningError::NotConfigured,
            AIError::Parse(msg) => ReasoningError::MalformedOutput(msg),
            AIError::ContentFiltered(msg) => ReasoningError::MalformedOutput(msg),
            other => ReasoningError::Upstream(other.to_string()),
        }
    }
}
