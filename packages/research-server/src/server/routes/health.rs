use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub providers: Vec<String>,
}

/// Health check endpoint
///
/// Reports the configured search providers. Does not call them.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        providers: state.providers.clone(),
    })
}
