// Main entry point for the research API server

use std::sync::Arc;

use anyhow::{Context, Result};
use market_research::Researcher;
use research_server::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,market_research=debug,research_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting business research API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let providers: Vec<String> = config
        .credentials
        .configured_providers()
        .into_iter()
        .map(String::from)
        .collect();
    tracing::info!(providers = ?providers, "Configuration loaded");

    let researcher = Researcher::from_credentials(&config.credentials, config.research.clone())
        .context("Failed to initialize research providers")?;

    let app = build_app(AppState::new(
        Arc::new(researcher),
        config.research,
        providers,
    ));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
