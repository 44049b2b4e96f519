//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use market_research::{ResearchConfig, ResearchTools};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::routes::{
    communities_handler, competitors_handler, health_handler, market_size_handler,
    pricing_handler, report_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<dyn ResearchTools>,
    pub config: Arc<ResearchConfig>,
    /// Configured search providers, in fallback order
    pub providers: Vec<String>,
}

impl AppState {
    pub fn new(tools: Arc<dyn ResearchTools>, config: ResearchConfig, providers: Vec<String>) -> Self {
        Self {
            tools,
            config: Arc::new(config),
            providers,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/tools/estimate_market_size", post(market_size_handler))
        .route("/tools/search_competitors", post(competitors_handler))
        .route("/tools/find_communities", post(communities_handler))
        .route("/tools/extract_pricing", post(pricing_handler))
        .route("/tools/full_research_report", post(report_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
