//! Business Research Library
//!
//! Answers four questions about a business idea from public web data: how
//! big is the market, who competes in it, where do its customers talk, and
//! what do competitors charge. A fifth operation runs all four and merges
//! them into one report that survives partial failure.
//!
//! # Design Philosophy
//!
//! - Heuristics are small pure functions over text, testable in isolation
//! - Providers sit behind traits; orchestrators never see HTTP
//! - Independent branches run concurrently and fail independently
//! - "No data" is an answer, "every provider is broken" is an error
//!
//! # Usage
//!
//! ```rust,ignore
//! use market_research::{Researcher, ResearchConfig, ReportRequest, SearchCredentials};
//!
//! let creds = SearchCredentials::new().with_tavily(tavily_key);
//! let researcher = Researcher::from_credentials(&creds, ResearchConfig::default())?;
//!
//! let report = researcher
//!     .full_research_report(&ReportRequest::new("mobile car wash app"))
//!     .await?;
//! println!("{:?}", report.summary.key_takeaways);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Provider abstractions (WebSearcher, StorySearcher, PageFetcher)
//! - [`types`] - Requests, results and configuration
//! - [`extract`] - Text heuristics (dollar figures, scope, tiers, taglines)
//! - [`pipeline`] - Scoring, outlier filtering, dedup and the settle-all join
//! - [`tools`] - The five research operations
//! - [`providers`] - Tavily, Brave and Hacker News clients
//! - [`fetchers`] - HTML fetching and conversion to markdown
//! - [`security`] - Credential handling and SSRF protection
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extract;
pub mod fetchers;
pub mod pipeline;
pub mod providers;
pub mod research;
pub mod security;
pub mod testing;
pub mod tools;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, ResearchError, Result, Retryable, SearchError, SecurityError};
pub use research::Researcher;
pub use traits::{
    fetcher::{FetchedPage, PageFetcher},
    research::ResearchTools,
    searcher::WebSearcher,
    stories::{Story, StorySearcher},
};
pub use types::{
    community::{Community, Platform},
    competitor::Competitor,
    config::ResearchConfig,
    market::{Confidence, Geography, MarketScope, MarketSizeEstimate, SourceRef, SubRange},
    pricing::{BillingPeriod, PricingModel, PricingPage, PricingTier, StructuredPricing},
    report::{FullReport, ReportSection, ReportSummary},
    requests::{CommunityRequest, CompetitorRequest, MarketSizeRequest, PricingRequest, ReportRequest},
    search::SearchHit,
};

// Re-export the tool entry points
pub use tools::{
    estimate_market_size, extract_pricing, find_communities, full_research_report,
    search_competitors,
};

// Re-export providers and fetchers
pub use fetchers::{HttpPageFetcher, ValidatedFetcher};
pub use providers::{
    brave_provider, hacker_news_provider, search_chain, tavily_provider, BraveWebSearcher,
    FallbackSearcher, HackerNewsSearcher, Provider, RateLimitExt, RateLimited, RetryExt, RetryPolicy,
    Retrying, TavilyWebSearcher,
};
pub use security::{SearchCredentials, SecretString, UrlValidator};

// Re-export pipeline components
pub use pipeline::{derive_topics, settle_all, Settled};
