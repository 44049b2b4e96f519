//! Rate-limited provider wrapper.
//!
//! Wraps any searcher or fetcher with a governor rate limiter. Callers
//! block until a slot frees; one wrapper instance per provider gives a
//! process-wide limit when shared behind an `Arc`.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::{FetchResult, SearchResult};
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::traits::searcher::WebSearcher;
use crate::traits::stories::{Story, StorySearcher};
use crate::types::search::SearchHit;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A provider wrapper that enforces a requests-per-second quota.
pub struct RateLimited<T> {
    inner: T,
    limiter: Arc<DefaultRateLimiter>,
}

impl<T> RateLimited<T> {
    /// Wrap `inner` with a per-second quota. Zero is treated as one.
    pub fn new(inner: T, requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(inner, Quota::per_second(rps))
    }

    /// Wrap with a custom quota.
    pub fn with_quota(inner: T, quota: Quota) -> Self {
        Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn wait_for_permit(&self) {
        self.limiter.until_ready().await;
    }
}

#[async_trait]
impl<T: WebSearcher> WebSearcher for RateLimited<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        self.wait_for_permit().await;
        self.inner.search_with_limit(query, limit).await
    }
}

#[async_trait]
impl<T: StorySearcher> StorySearcher for RateLimited<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        self.wait_for_permit().await;
        self.inner.search_stories(query, limit).await
    }
}

#[async_trait]
impl<T: PageFetcher> PageFetcher for RateLimited<T> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.wait_for_permit().await;
        self.inner.fetch(url).await
    }
}

/// Extension trait for easy rate limiting.
pub trait RateLimitExt: Sized {
    fn rate_limited(self, requests_per_second: u32) -> RateLimited<Self> {
        RateLimited::new(self, requests_per_second)
    }
}

impl<T: Sized> RateLimitExt for T {}
