//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port and the wrappers that make outbound
//! calls resilient.
//!
//! ## Available Adapters
//!
//! - `GatewayProvider` - OpenAI-compatible chat completions gateway (bearer auth)
//! - `GeminiProvider` - Google Gemini `generateContent` (key in query)
//! - `ResilientProvider` - Pacing, retry with backoff, overall deadline
//! - `FailoverAIProvider` - Wrapper with automatic failover between providers
//! - `MockAIProvider` - Configurable mock for testing
//!
//! ## Building Blocks
//!
//! - `CallPacer` - Minimum spacing between consecutive outbound calls
//! - `RetryPolicy` - Capped exponential backoff with jitter
//! - `provider_from_config` - Assembles the provider stack from `AiConfig`

mod factory;
mod failover_provider;
mod gateway_provider;
mod gemini_provider;
mod mock_provider;
mod pacer;
mod resilient_provider;
mod retry;

pub use factory::{provider_from_config, resilient_stack};
pub use failover_provider::FailoverAIProvider;
pub use gateway_provider::{
    GatewayConfig, GatewayProvider, DEFAULT_GATEWAY_BASE_URL, DEFAULT_GATEWAY_MODEL,
};
pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockResponse};
pub use pacer::CallPacer;
pub use resilient_provider::ResilientProvider;
pub use retry::{RetryPolicy, RETRYABLE_STATUSES};
