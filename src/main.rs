//! Decision Lens HTTP server.

use std::error::Error;

use decision_lens::adapters::ai::provider_from_config;
use decision_lens::adapters::http::{app_router, ReasoningHandlers};
use decision_lens::application::ReasoningPipeline;
use decision_lens::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        return Err(err.into());
    }

    let provider = provider_from_config(&config.ai);
    let pipeline = ReasoningPipeline::new(provider, config.features.rules_fallback);
    tracing::info!(
        ai_enabled = pipeline.has_provider(),
        rules_fallback = pipeline.rules_fallback(),
        "reasoning pipeline ready"
    );

    let app = app_router(
        ReasoningHandlers::from_pipeline(pipeline),
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. Production logs are JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
