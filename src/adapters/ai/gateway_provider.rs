//! Gateway Provider - AIProvider for an OpenAI-compatible chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GatewayConfig::new(api_key)
//!     .with_model("google/gemini-3-flash-preview")
//!     .with_base_url("https://ai.gateway.lovable.dev/v1");
//!
//! let provider = GatewayProvider::new(config);
//! ```
//!
//! A single call is one HTTP attempt. Pacing, retries and the overall
//! deadline are layered on by `ResilientProvider`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo,
};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-3-flash-preview";

/// Configuration for the gateway provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GATEWAY_MODEL.to_string(),
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat completions provider.
pub struct GatewayProvider {
    config: GatewayConfig,
    client: Client,
}

impl GatewayProvider {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the chat completions format.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(ChatMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
            response_format: request.json_mode.then(|| ResponseFormat {
                kind: "json_object".to_string(),
            }),
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .timeout(self.config.timeout)
            .json(&self.to_chat_request(request))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = check_status(response).await?;
        let chat: ChatResponse = response
            .json()
            .await
            .map_err(map_decode_error)?;
        from_chat_response(chat, &self.config.model)
    }
}

#[async_trait]
impl AIProvider for GatewayProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gateway", &self.config.model)
    }
}

/// Maps a transport failure to the error taxonomy.
///
/// The URL is stripped first: Gemini carries its key in the query string.
pub(super) fn map_send_error(error: reqwest::Error, timeout: Duration) -> AIError {
    let error = error.without_url();
    if error.is_timeout() {
        AIError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else if error.is_connect() {
        AIError::network(format!("Connection failed: {}", error))
    } else {
        AIError::network(error.to_string())
    }
}

pub(super) fn map_decode_error(error: reqwest::Error) -> AIError {
    AIError::parse(format!("Failed to parse response: {}", error.without_url()))
}

/// Passes successful responses through and classifies the rest.
pub(super) async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AIError::from_status(status.as_u16(), body))
}

fn from_chat_response(chat: ChatResponse, fallback_model: &str) -> Result<CompletionResponse, AIError> {
    let choice = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AIError::parse("Empty completion content"))?;

    Ok(CompletionResponse {
        content,
        model: chat.model.unwrap_or_else(|| fallback_model.to_string()),
        finish_reason,
    })
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Operation, RequestMetadata};

    fn provider() -> GatewayProvider {
        GatewayProvider::new(GatewayConfig::new("test-key").with_base_url("https://gw.test/v1/"))
    }

    #[test]
    fn config_builder_works() {
        let config = GatewayConfig::new("test-key")
            .with_model("some/model")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.model, "some/model");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn defaults_target_the_gateway() {
        let config = GatewayConfig::new("k");
        assert_eq!(config.model, DEFAULT_GATEWAY_MODEL);
        assert_eq!(config.base_url, DEFAULT_GATEWAY_BASE_URL);
    }

    #[test]
    fn completions_url_trims_trailing_slash() {
        assert_eq!(provider().completions_url(), "https://gw.test/v1/chat/completions");
    }

    #[test]
    fn chat_request_puts_system_prompt_first_and_sets_json_format() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::AnalyzeExplanation))
            .with_system_prompt("rules")
            .with_message(MessageRole::User, "question")
            .with_temperature(0.3)
            .with_json_mode();

        let json = serde_json::to_value(provider().to_chat_request(&request)).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "rules");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn chat_request_omits_format_without_json_mode() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::GenerateQuestions))
            .with_message(MessageRole::User, "q");
        let json = serde_json::to_value(provider().to_chat_request(&request)).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"model":"m-1","choices":[{"message":{"role":"assistant","content":"{\"a\":1}"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        let response = from_chat_response(chat, "fallback").unwrap();
        assert_eq!(response.content, "{\"a\":1}");
        assert_eq!(response.model, "m-1");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn chat_response_without_choices_is_parse_error() {
        let chat: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(from_chat_response(chat, "m"), Err(AIError::Parse(_))));
    }

    #[test]
    fn chat_response_with_empty_content_is_parse_error() {
        let chat: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(matches!(from_chat_response(chat, "m"), Err(AIError::Parse(_))));
    }

    #[test]
    fn provider_info_reports_gateway() {
        let info = provider().provider_info();
        assert_eq!(info.name, "gateway");
        assert_eq!(info.model, DEFAULT_GATEWAY_MODEL);
    }
}
