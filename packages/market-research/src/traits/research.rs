//! The four single-purpose research operations as one capability.
//!
//! The report aggregator is generic over this trait so it can be driven by
//! the real [`Researcher`](crate::Researcher) or by stubs.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::community::Community;
use crate::types::competitor::Competitor;
use crate::types::market::MarketSizeEstimate;
use crate::types::pricing::PricingPage;
use crate::types::requests::{
    CommunityRequest, CompetitorRequest, MarketSizeRequest, PricingRequest,
};

#[async_trait]
pub trait ResearchTools: Send + Sync {
    async fn estimate_market_size(&self, request: &MarketSizeRequest) -> Result<MarketSizeEstimate>;

    async fn search_competitors(&self, request: &CompetitorRequest) -> Result<Vec<Competitor>>;

    async fn find_communities(&self, request: &CommunityRequest) -> Result<Vec<Community>>;

    /// Never fails; see [`PricingPage::failed`].
    async fn extract_pricing(&self, request: &PricingRequest) -> PricingPage;
}

#[async_trait]
impl<T: ResearchTools + ?Sized> ResearchTools for Arc<T> {
    async fn estimate_market_size(&self, request: &MarketSizeRequest) -> Result<MarketSizeEstimate> {
        (**self).estimate_market_size(request).await
    }

    async fn search_competitors(&self, request: &CompetitorRequest) -> Result<Vec<Competitor>> {
        (**self).search_competitors(request).await
    }

    async fn find_communities(&self, request: &CommunityRequest) -> Result<Vec<Community>> {
        (**self).find_communities(request).await
    }

    async fn extract_pricing(&self, request: &PricingRequest) -> PricingPage {
        (**self).extract_pricing(request).await
    }
}
