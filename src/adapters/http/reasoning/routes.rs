//! HTTP routes for reasoning endpoints.

use axum::{
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    analyze_explanation, challenge_thinking, generate_explanation, generate_questions, health,
    ReasoningApiError, ReasoningHandlers,
};

/// Creates the reasoning router with all endpoints.
pub fn reasoning_routes(handlers: ReasoningHandlers) -> Router {
    Router::new()
        .route("/analyze-explanation", post(analyze_explanation))
        .route("/challenge-thinking", post(challenge_thinking))
        .route("/generate-questions", post(generate_questions))
        .route("/generate-explanation", post(generate_explanation))
        .route("/health", get(health))
        .with_state(handlers)
}

/// Full application router: endpoints plus tracing, CORS and a whole-request
/// timeout (408 `{error}` when exceeded).
pub fn app_router(
    handlers: ReasoningHandlers,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    reasoning_routes(handlers)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_as_json))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// The timeout layer answers with an empty 408; give it the usual error body.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("request exceeded the server timeout");
    ReasoningApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
}

/// Request headers browser clients are allowed to send.
const ALLOWED_HEADERS: [&str; 8] = [
    "authorization",
    "x-client-info",
    "apikey",
    "content-type",
    "x-supabase-client-platform",
    "x-supabase-client-platform-version",
    "x-supabase-client-runtime",
    "x-supabase-client-runtime-version",
];

/// CORS policy: any origin when `origins` is empty, otherwise the listed ones.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static));

    if origins.is_empty() || origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reasoning::ReasoningPipeline;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        app_router(
            ReasoningHandlers::from_pipeline(ReasoningPipeline::rules_only().with_seed(1)),
            &[],
            Duration::from_secs(30),
        )
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn generate_questions_returns_rules_questions() {
        let (status, body) = post_json(
            app(),
            "/generate-questions",
            r#"{"decision_text": "I am quitting my job to start a business"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_source"], "rules");
        assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_field_is_400_with_error_body() {
        let (status, body) = post_json(app(), "/analyze-explanation", r#"{"question": "Why?"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "answer is required");
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let (status, body) = post_json(app(), "/challenge-thinking", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn analysis_scores_are_numbers_in_range() {
        let (status, body) = post_json(
            app(),
            "/analyze-explanation",
            r#"{"question": "Why switch?", "answer": "Because the data shows better growth"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let confidence = body["confidence_score"].as_u64().unwrap();
        assert!((20..=90).contains(&confidence));
        assert!(body["missing_assumptions"].is_array());
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/generate-explanation")
                    .header("origin", "https://example.org")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn server_timeout_is_reported_as_json() {
        use crate::adapters::ai::MockAIProvider;
        use std::sync::Arc;

        let mock = MockAIProvider::new().with_delay(Duration::from_secs(60));
        let app = app_router(
            ReasoningHandlers::from_pipeline(ReasoningPipeline::new(Some(Arc::new(mock)), true)),
            &[],
            Duration::from_secs(1),
        );

        let (status, body) =
            post_json(app, "/generate-questions", r#"{"decision_text": "I quit"}"#).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["error"], "Request timed out");
    }

    #[test]
    fn explicit_origins_build_a_list_policy() {
        // Construction must not panic on valid or invalid entries.
        let _ = cors_layer(&["https://app.example".to_string(), "bad\norigin".to_string()]);
    }
}
