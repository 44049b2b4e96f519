//! Bounded retry with exponential backoff.
//!
//! Only errors classified as transient by [`Retryable`] are retried.
//! [`Retrying`] sits outside [`RateLimited`](super::RateLimited) so every
//! attempt waits for its own permit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::{Retryable, SearchResult};
use crate::traits::searcher::WebSearcher;
use crate::traits::stories::{Story, StorySearcher};
use crate::types::config::duration_secs;
use crate::types::search::SearchHit;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Default: 3.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each time. Default: 500ms.
    #[serde(with = "duration_secs")]
    pub base_delay: Duration,
    /// Upper bound on any single delay. Default: 4s.
    #[serde(with = "duration_secs")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempts run out.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && e.is_transient() => {
                let delay = policy.delay_for(attempt);
                warn!(
                    operation = label,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// A provider wrapper that retries transient failures.
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Retrying<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: WebSearcher> WebSearcher for Retrying<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        with_retry(&self.policy, self.inner.name(), || {
            self.inner.search_with_limit(query, limit)
        })
        .await
    }
}

#[async_trait]
impl<T: StorySearcher> StorySearcher for Retrying<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        with_retry(&self.policy, self.inner.name(), || {
            self.inner.search_stories(query, limit)
        })
        .await
    }
}

pub trait RetryExt: Sized {
    fn retrying(self, policy: RetryPolicy) -> Retrying<Self> {
        Retrying::new(self, policy)
    }
}

impl<T: Sized> RetryExt for T {}
