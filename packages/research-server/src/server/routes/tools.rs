//! One POST route per research tool.

use axum::{extract::Extension, Json};
use market_research::{
    full_research_report, Community, CommunityRequest, Competitor, CompetitorRequest, FullReport,
    MarketSizeEstimate, MarketSizeRequest, PricingPage, PricingRequest, ReportRequest,
};

use crate::server::app::AppState;
use crate::server::error::ApiError;

pub async fn market_size_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<MarketSizeRequest>,
) -> Result<Json<MarketSizeEstimate>, ApiError> {
    let estimate = state.tools.estimate_market_size(&request).await?;
    Ok(Json(estimate))
}

pub async fn competitors_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<CompetitorRequest>,
) -> Result<Json<Vec<Competitor>>, ApiError> {
    let competitors = state.tools.search_competitors(&request).await?;
    Ok(Json(competitors))
}

pub async fn communities_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<CommunityRequest>,
) -> Result<Json<Vec<Community>>, ApiError> {
    let communities = state.tools.find_communities(&request).await?;
    Ok(Json(communities))
}

/// Fetch failures come back as a 200 with the reason in the page fields;
/// only a malformed URL is rejected.
pub async fn pricing_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<PricingRequest>,
) -> Result<Json<PricingPage>, ApiError> {
    request.validate()?;
    Ok(Json(state.tools.extract_pricing(&request).await))
}

pub async fn report_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<FullReport>, ApiError> {
    let report = full_research_report(state.tools.as_ref(), &state.config, &request).await?;
    Ok(Json(report))
}
