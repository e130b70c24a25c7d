//! Gemini Provider - AIProvider for Google's `generateContent` API.
//!
//! The API key travels in the query string. System and user messages are
//! flattened into one user turn; JSON mode maps to `responseMimeType`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::gateway_provider::{check_status, map_decode_error, map_send_error};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
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

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Endpoint URL without the key; the key is added as a query parameter.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(request: &CompletionRequest) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.flattened_prompt(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: request.json_mode.then(|| "application/json".to_string()),
            },
        }
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
            .timeout(self.config.timeout)
            .json(&Self::to_gemini_request(&request))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;

        let response = check_status(response).await?;
        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(map_decode_error)?;

        from_generate_response(generated, &self.config.model)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

fn from_generate_response(
    generated: GenerateResponse,
    model: &str,
) -> Result<CompletionResponse, AIError> {
    let candidate = generated
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No candidates in response"))?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty());

    match (text, finish_reason) {
        (Some(content), _) => Ok(CompletionResponse {
            content,
            model: model.to_string(),
            finish_reason,
        }),
        (None, FinishReason::ContentFilter) => {
            Err(AIError::ContentFiltered("blocked by safety settings".to_string()))
        }
        (None, _) => Err(AIError::parse("Empty candidate content")),
    }
}

// ----- generateContent API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MessageRole, Operation, RequestMetadata};

    #[test]
    fn generate_url_embeds_model() {
        let provider = GeminiProvider::new(GeminiConfig::new("k"));
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_flattens_prompt_into_one_user_turn() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::ChallengeThinking))
            .with_system_prompt("rules")
            .with_message(MessageRole::User, "reasoning")
            .with_temperature(0.4)
            .with_json_mode();

        let json = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "rules\n\nreasoning");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[tokio::test]
    async fn transport_errors_never_carry_the_api_key() {
        // Nothing listens on port 1, so the connection is refused.
        let provider = GeminiProvider::new(
            GeminiConfig::new("SUPERSECRETKEY")
                .with_base_url("http://127.0.0.1:1/v1beta")
                .with_timeout(Duration::from_secs(2)),
        );
        let request = CompletionRequest::new(RequestMetadata::new(Operation::GenerateQuestions))
            .with_message(MessageRole::User, "decision");

        let err = provider.complete(request).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[test]
    fn response_text_comes_from_first_candidate_part() {
        let generated: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Why?"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        let response = from_generate_response(generated, "gemini-2.0-flash").unwrap();
        assert_eq!(response.content, "Why?");
        assert_eq!(response.model, "gemini-2.0-flash");
    }

    #[test]
    fn missing_candidates_is_parse_error() {
        let generated: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            from_generate_response(generated, "m"),
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn safety_block_without_text_is_content_filtered() {
        let generated: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(matches!(
            from_generate_response(generated, "m"),
            Err(AIError::ContentFiltered(_))
        ));
    }

    #[test]
    fn provider_info_reports_gemini() {
        let provider = GeminiProvider::new(GeminiConfig::new("k").with_model("gemini-x"));
        assert_eq!(provider.provider_info(), ProviderInfo::new("gemini", "gemini-x"));
    }
}
