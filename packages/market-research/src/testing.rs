//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the research library
//! without making real search or network calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult, ResearchError, Result, SearchError, SearchResult};
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::traits::research::ResearchTools;
use crate::traits::searcher::WebSearcher;
use crate::traits::stories::{Story, StorySearcher};
use crate::types::community::Community;
use crate::types::competitor::Competitor;
use crate::types::market::MarketSizeEstimate;
use crate::types::pricing::{PricingPage, StructuredPricing};
use crate::types::requests::{CommunityRequest, CompetitorRequest, MarketSizeRequest, PricingRequest};
use crate::types::search::SearchHit;

/// A mock web searcher for testing.
///
/// A query matches a canned result set when it contains that set's key;
/// keys are checked in the order they were added. Unmatched queries return
/// no hits.
pub struct MockWebSearcher {
    name: String,

    /// Canned hits by query substring
    results: Arc<RwLock<Vec<(String, Vec<SearchHit>)>>>,

    /// When set, every query fails with this message
    failure: Option<String>,

    /// Call tracking
    queries: Arc<RwLock<Vec<String>>>,
}

impl Default for MockWebSearcher {
    fn default() -> Self {
        Self::named("mock")
    }
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock with a specific provider name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Arc::new(RwLock::new(Vec::new())),
            failure: None,
            queries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Return `hits` for any query containing `key`.
    pub fn with_results(self, key: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().push((key.into(), hits));
        self
    }

    /// Shorthand for hits that only carry a URL.
    pub fn with_urls(self, key: impl Into<String>, urls: &[&str]) -> Self {
        let hits = urls
            .iter()
            .map(|url| SearchHit::new(*url, *url, ""))
            .collect();
        self.with_results(key, hits)
    }

    /// Fail every query with a provider error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(message) = &self.failure {
            return Err(SearchError::Status {
                provider: self.name.clone(),
                status: 500,
                body: message.clone(),
            });
        }

        let results = self.results.read().unwrap();
        let hits = results
            .iter()
            .find(|(key, _)| query.contains(key.as_str()))
            .map(|(_, hits)| {
                hits.iter()
                    .take(limit)
                    .cloned()
                    .map(|hit| {
                        if hit.source.is_empty() {
                            hit.with_source(self.name.clone())
                        } else {
                            hit
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(hits)
    }
}

/// A mock forum searcher for testing.
#[derive(Default)]
pub struct MockStorySearcher {
    /// Canned stories by query substring
    stories: Arc<RwLock<Vec<(String, Vec<Story>)>>>,

    failure: Option<String>,

    queries: Arc<RwLock<Vec<String>>>,
}

impl MockStorySearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `stories` for any query containing `key`.
    pub fn with_stories(self, key: impl Into<String>, stories: Vec<Story>) -> Self {
        self.stories.write().unwrap().push((key.into(), stories));
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl StorySearcher for MockStorySearcher {
    fn name(&self) -> &str {
        "mock-stories"
    }

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(message) = &self.failure {
            return Err(SearchError::Status {
                provider: self.name().to_string(),
                status: 500,
                body: message.clone(),
            });
        }

        Ok(self
            .stories
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| query.contains(key.as_str()))
            .map(|(_, stories)| stories.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// A mock page fetcher for testing.
///
/// Pages are matched by exact URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct MockPageFetcher {
    /// Markdown by URL
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// URLs that fail with a status
    failures: Arc<RwLock<HashMap<String, u16>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn with_page(self, url: impl Into<String>, markdown: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), markdown.into());
        self
    }

    /// Mark a URL as failing with `status`.
    pub fn failing(self, url: impl Into<String>, status: u16) -> Self {
        self.failures.write().unwrap().insert(url.into(), status);
        self
    }

    /// URLs fetched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(status) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .map(|markdown| FetchedPage::new(url, markdown.clone()))
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Canned research tools for driving the report aggregator.
///
/// Market size defaults to an "Unknown" estimate, competitors and
/// communities to empty lists, and every pricing URL succeeds with an empty
/// structured result unless marked as failing.
#[derive(Default)]
pub struct MockResearchTools {
    market_size: Option<MarketSizeEstimate>,
    market_failure: Option<String>,
    competitors: Vec<Competitor>,
    competitor_failure: Option<String>,
    communities: Vec<Community>,
    community_failure: Option<String>,
    pricing: HashMap<String, StructuredPricing>,
    pricing_failures: HashSet<String>,

    /// Pricing URLs requested, in order
    pricing_calls: Arc<RwLock<Vec<String>>>,
}

impl MockResearchTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market_size(mut self, estimate: MarketSizeEstimate) -> Self {
        self.market_size = Some(estimate);
        self
    }

    pub fn failing_market_size(mut self, message: impl Into<String>) -> Self {
        self.market_failure = Some(message.into());
        self
    }

    pub fn with_competitors(mut self, competitors: Vec<Competitor>) -> Self {
        self.competitors = competitors;
        self
    }

    pub fn failing_competitors(mut self, message: impl Into<String>) -> Self {
        self.competitor_failure = Some(message.into());
        self
    }

    pub fn with_communities(mut self, communities: Vec<Community>) -> Self {
        self.communities = communities;
        self
    }

    pub fn failing_communities(mut self, message: impl Into<String>) -> Self {
        self.community_failure = Some(message.into());
        self
    }

    pub fn with_pricing(mut self, url: impl Into<String>, pricing: StructuredPricing) -> Self {
        self.pricing.insert(url.into(), pricing);
        self
    }

    pub fn failing_pricing(mut self, url: impl Into<String>) -> Self {
        self.pricing_failures.insert(url.into());
        self
    }

    pub fn pricing_calls(&self) -> Vec<String> {
        self.pricing_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ResearchTools for MockResearchTools {
    async fn estimate_market_size(&self, _request: &MarketSizeRequest) -> Result<MarketSizeEstimate> {
        if let Some(message) = &self.market_failure {
            return Err(ResearchError::NoResults(message.clone()));
        }
        Ok(self
            .market_size
            .clone()
            .unwrap_or_else(|| MarketSizeEstimate::unknown("No market size data")))
    }

    async fn search_competitors(&self, _request: &CompetitorRequest) -> Result<Vec<Competitor>> {
        match &self.competitor_failure {
            Some(message) => Err(ResearchError::NoResults(message.clone())),
            None => Ok(self.competitors.clone()),
        }
    }

    async fn find_communities(&self, _request: &CommunityRequest) -> Result<Vec<Community>> {
        match &self.community_failure {
            Some(message) => Err(ResearchError::AllBatchesFailed {
                batches: 4,
                first_error: message.clone(),
            }),
            None => Ok(self.communities.clone()),
        }
    }

    async fn extract_pricing(&self, request: &PricingRequest) -> PricingPage {
        self.pricing_calls.write().unwrap().push(request.url.clone());
        let name = request.competitor_name.clone();

        if self.pricing_failures.contains(&request.url) {
            return PricingPage::failed(&request.url, name, "HTTP 503 fetching pricing page");
        }

        PricingPage {
            url: request.url.clone(),
            competitor_name: name,
            markdown_content: String::new(),
            extraction_hints: "No pricing signals found".to_string(),
            structured_pricing: Some(self.pricing.get(&request.url).cloned().unwrap_or_default()),
        }
    }
}
