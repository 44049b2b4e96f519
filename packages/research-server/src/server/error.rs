//! Tool errors as JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use market_research::ResearchError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

/// A `ResearchError` on its way out as `{error, details}`.
#[derive(Debug)]
pub struct ApiError(pub ResearchError);

impl From<ResearchError> for ApiError {
    fn from(err: ResearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ResearchError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Tool call failed");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            details: format!("{:?}", self.0),
        };
        (status, Json(body)).into_response()
    }
}
