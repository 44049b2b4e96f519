//! The research facade: live collaborators plus configuration.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::{ResearchError, Result};
use crate::fetchers::{HttpPageFetcher, ValidatedFetcher};
use crate::providers::{hacker_news_provider, search_chain};
use crate::security::SearchCredentials;
use crate::tools;
use crate::traits::fetcher::PageFetcher;
use crate::traits::research::ResearchTools;
use crate::traits::searcher::WebSearcher;
use crate::traits::stories::StorySearcher;
use crate::types::community::Community;
use crate::types::competitor::Competitor;
use crate::types::config::ResearchConfig;
use crate::types::market::MarketSizeEstimate;
use crate::types::pricing::PricingPage;
use crate::types::report::FullReport;
use crate::types::requests::{
    CommunityRequest, CompetitorRequest, MarketSizeRequest, PricingRequest, ReportRequest,
};

/// Runs the research tools against a set of providers.
///
/// # Example
///
/// ```rust,ignore
/// use market_research::{Researcher, ResearchConfig, SearchCredentials, MarketSizeRequest};
///
/// let creds = SearchCredentials::new().with_tavily(std::env::var("TAVILY_API_KEY")?);
/// let researcher = Researcher::from_credentials(&creds, ResearchConfig::default())?;
/// let estimate = researcher
///     .estimate_market_size(&MarketSizeRequest::new("pet grooming"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct Researcher {
    searcher: Arc<dyn WebSearcher>,
    stories: Arc<dyn StorySearcher>,
    fetcher: Arc<dyn PageFetcher>,
    config: ResearchConfig,
}

impl Researcher {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        stories: Arc<dyn StorySearcher>,
        fetcher: Arc<dyn PageFetcher>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            searcher,
            stories,
            fetcher,
            config,
        }
    }

    /// Wire up the live providers.
    ///
    /// Fails when no search credential is present.
    pub fn from_credentials(credentials: &SearchCredentials, config: ResearchConfig) -> Result<Self> {
        if credentials.is_empty() {
            return Err(ResearchError::Config(
                "no search provider configured: set TAVILY_API_KEY or BRAVE_API_KEY".to_string(),
            ));
        }

        let searcher = search_chain(credentials, &config);
        let stories = hacker_news_provider(&config);
        let http = HttpPageFetcher::new(config.fetch_timeout)
            .map_err(|e| ResearchError::Config(format!("failed to build HTTP client: {}", e)))?
            .with_retry(config.retry);

        info!(
            providers = ?searcher.provider_names(),
            timeout_secs = config.fetch_timeout.as_secs(),
            "Researcher ready"
        );

        Ok(Self::new(
            Arc::new(searcher),
            Arc::new(stories),
            Arc::new(ValidatedFetcher::new(http)),
            config,
        ))
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Provider tag of the web search chain.
    pub fn search_provider(&self) -> &str {
        self.searcher.name()
    }

    pub async fn full_research_report(&self, request: &ReportRequest) -> Result<FullReport> {
        tools::full_research_report(self, &self.config, request).await
    }
}

#[async_trait]
impl ResearchTools for Researcher {
    async fn estimate_market_size(&self, request: &MarketSizeRequest) -> Result<MarketSizeEstimate> {
        tools::estimate_market_size(self.searcher.as_ref(), &self.config, request).await
    }

    async fn search_competitors(&self, request: &CompetitorRequest) -> Result<Vec<Competitor>> {
        tools::search_competitors(
            self.searcher.as_ref(),
            self.fetcher.as_ref(),
            &self.config,
            request,
        )
        .await
    }

    async fn find_communities(&self, request: &CommunityRequest) -> Result<Vec<Community>> {
        tools::find_communities(
            self.searcher.as_ref(),
            self.stories.as_ref(),
            &self.config,
            request,
        )
        .await
    }

    async fn extract_pricing(&self, request: &PricingRequest) -> PricingPage {
        tools::extract_pricing(self.fetcher.as_ref(), &self.config, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPageFetcher, MockStorySearcher, MockWebSearcher};
    use crate::types::search::SearchHit;

    #[test]
    fn test_missing_credentials_is_config_error() {
        let err = Researcher::from_credentials(&SearchCredentials::new(), ResearchConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ResearchError::Config(_)));
    }

    #[test]
    fn test_live_wiring_names_chain() {
        let creds = SearchCredentials::new().with_brave("key");
        let researcher = Researcher::from_credentials(&creds, ResearchConfig::default()).unwrap();
        assert_eq!(researcher.search_provider(), "fallback");
    }

    #[tokio::test]
    async fn test_report_through_facade() {
        let searcher = MockWebSearcher::new().with_results(
            "TAM billion",
            vec![SearchHit::new("Report", "https://r.com/a", "A $3 billion market.")],
        );
        let researcher = Researcher::new(
            Arc::new(searcher),
            Arc::new(MockStorySearcher::new()),
            Arc::new(MockPageFetcher::new()),
            ResearchConfig::default(),
        );

        let report = researcher
            .full_research_report(&ReportRequest::new("dog walking"))
            .await
            .unwrap();

        assert_eq!(report.market_size.data.unwrap().high, "$3.0B");
        assert!(report.competitors.is_failed());
        assert_eq!(report.summary.failed_sections, vec!["competitors"]);
    }
}
