//! AI Provider Port - Interface for generative-text service integrations.
//!
//! This port abstracts every call to an external model so that the reasoning
//! handlers can request completions without coupling to a specific vendor.
//!
//! # Design
//!
//! - Provider-agnostic message format
//! - JSON mode as a request flag rather than a vendor option
//! - Error taxonomy that separates retryable upstream failures from
//!   terminal ones (payment required, missing credentials)
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::new(request.messages[0].content.clone(), "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::time::Instant;
use uuid::Uuid;

/// Port for generative-text provider interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON object response.
    pub json_mode: bool,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            temperature: None,
            json_mode: false,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Requests a JSON object response.
    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }

    /// Concatenated user-visible prompt, for providers without a system role.
    pub fn flattened_prompt(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.messages.len() + 1);
        if let Some(system) = &self.system_prompt {
            parts.push(system);
        }
        parts.extend(self.messages.iter().map(|m| m.content.as_str()));
        parts.join("\n\n")
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Which reasoning operation a request serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AnalyzeExplanation,
    ChallengeThinking,
    GenerateQuestions,
    GenerateExplanation,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AnalyzeExplanation => "analyze_explanation",
            Operation::ChallengeThinking => "challenge_thinking",
            Operation::GenerateQuestions => "generate_questions",
            Operation::GenerateExplanation => "generate_explanation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Operation the completion serves.
    pub operation: Operation,
    /// Trace ID correlating log lines of one request.
    pub trace_id: String,
    /// Instant by which every provider tier must have answered.
    pub deadline: Option<Instant>,
}

impl RequestMetadata {
    /// Creates metadata with a fresh trace id.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            trace_id: Uuid::new_v4().to_string(),
            deadline: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline unless an earlier one is already present.
    pub fn tighten_deadline(&mut self, deadline: Instant) -> Instant {
        let effective = self.deadline.map_or(deadline, |current| current.min(deadline));
        self.deadline = Some(effective);
        effective
    }
}

/// Response from AI completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit the output token limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gateway", "gemini").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    /// Provider answered 429.
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider answered 402 (quota or billing exhausted).
    #[error("payment required: provider credits exhausted")]
    PaymentRequired,

    /// Provider answered 500, 502, 503 or 504.
    #[error("provider unavailable: HTTP {status}")]
    Unavailable { status: u16 },

    /// Any other non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// API key rejected (401/403).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// A single attempt or the whole retry budget ran out of time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Content was filtered by the provider.
    #[error("content filtered: {0}")]
    ContentFiltered(String),

    /// No credential configured for any provider.
    #[error("AI provider is not configured")]
    NotConfigured,
}

impl AIError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            429 => AIError::RateLimited,
            402 => AIError::PaymentRequired,
            401 | 403 => AIError::AuthenticationFailed,
            500 | 502 | 503 | 504 => AIError::Unavailable { status },
            _ => AIError::Http {
                status,
                message: body.into(),
            },
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// HTTP status behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AIError::RateLimited => Some(429),
            AIError::PaymentRequired => Some(402),
            AIError::Unavailable { status } | AIError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::AnalyzeExplanation))
            .with_message(MessageRole::User, "Hello")
            .with_system_prompt("Be neutral")
            .with_temperature(0.3)
            .with_json_mode();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.system_prompt, Some("Be neutral".to_string()));
        assert_eq!(request.temperature, Some(0.3));
        assert!(request.json_mode);
        assert_eq!(request.metadata.operation, Operation::AnalyzeExplanation);
    }

    #[test]
    fn flattened_prompt_puts_system_first() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::GenerateQuestions))
            .with_system_prompt("Rules")
            .with_message(MessageRole::User, "Decision");
        assert_eq!(request.flattened_prompt(), "Rules\n\nDecision");
    }

    #[test]
    fn tighten_deadline_keeps_the_earlier_instant() {
        let now = Instant::now();
        let early = now + std::time::Duration::from_secs(5);
        let late = now + std::time::Duration::from_secs(15);

        let mut metadata = RequestMetadata::new(Operation::GenerateQuestions);
        assert_eq!(metadata.tighten_deadline(late), late);
        assert_eq!(metadata.tighten_deadline(early), early);
        assert_eq!(metadata.tighten_deadline(late), early);
        assert_eq!(metadata.deadline, Some(early));
    }

    #[test]
    fn metadata_gets_unique_trace_ids() {
        let a = RequestMetadata::new(Operation::ChallengeThinking);
        let b = RequestMetadata::new(Operation::ChallengeThinking);
        assert_ne!(a.trace_id, b.trace_id);
        assert_eq!(a.with_trace_id("t-1").trace_id, "t-1");
    }

    #[test]
    fn from_status_classifies() {
        assert_eq!(AIError::from_status(429, ""), AIError::RateLimited);
        assert_eq!(AIError::from_status(402, ""), AIError::PaymentRequired);
        assert_eq!(AIError::from_status(401, ""), AIError::AuthenticationFailed);
        assert_eq!(AIError::from_status(503, ""), AIError::Unavailable { status: 503 });
        assert!(matches!(AIError::from_status(400, "bad"), AIError::Http { status: 400, .. }));
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::RateLimited.is_retryable());
        for status in [500, 502, 503, 504] {
            assert!(AIError::from_status(status, "").is_retryable());
        }
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_ms: 10 }.is_retryable());

        assert!(!AIError::PaymentRequired.is_retryable());
        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::NotConfigured.is_retryable());
        assert!(!AIError::from_status(400, "").is_retryable());
        assert!(!AIError::parse("bad").is_retryable());
    }

    #[test]
    fn status_round_trips_for_http_errors() {
        assert_eq!(AIError::from_status(504, "").status(), Some(504));
        assert_eq!(AIError::network("x").status(), None);
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&MessageRole::System).unwrap(), "\"system\"");
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::RateLimited.to_string(), "rate limited by provider");
        assert_eq!(
            AIError::Unavailable { status: 502 }.to_string(),
            "provider unavailable: HTTP 502"
        );
    }
}
