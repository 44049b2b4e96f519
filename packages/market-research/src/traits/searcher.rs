//! Web searcher trait.
//!
//! Abstracts over keyword search providers (Tavily, Brave, ...). The
//! orchestrators only ever see `{title, url, snippet}` hits tagged with the
//! provider that produced them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SearchResult;
use crate::types::search::SearchHit;

/// Default number of results when the caller doesn't specify one.
pub const DEFAULT_LIMIT: usize = 10;

/// Keyword web search.
///
/// # Implementations
///
/// - `TavilyWebSearcher` - Tavily API (primary)
/// - `BraveWebSearcher` - Brave Search API (secondary)
/// - `FallbackSearcher` - ordered chain of the above
/// - `MockWebSearcher` - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Provider tag stamped on every hit.
    fn name(&self) -> &str;

    /// Search with a specific result limit.
    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>>;

    /// Search with the default limit.
    async fn search(&self, query: &str) -> SearchResult<Vec<SearchHit>> {
        self.search_with_limit(query, DEFAULT_LIMIT).await
    }
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        (**self).search_with_limit(query, limit).await
    }
}
