//! Configuration for the research pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::market::MarketScope;
use crate::providers::retry::RetryPolicy;

/// Tunables for scoring, fetching and report assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Minimum pre-fetch score for a competitor candidate.
    ///
    /// Default: 30.
    pub score_threshold: i32,

    /// Extra candidates fetched beyond `max_results` to absorb
    /// post-fetch rejections. Default: 3.
    pub fetch_headroom: usize,

    /// Results requested per search query. Default: 10.
    pub results_per_query: usize,

    /// Cap on communities returned. Default: 15.
    pub max_communities: usize,

    /// Minimum points for a Hacker News story to count. Default: 10.
    pub min_story_points: u32,

    /// Character limit for returned pricing markdown. Default: 15000.
    pub pricing_markdown_limit: usize,

    /// How many top competitors get their pricing extracted. Default: 3.
    pub pricing_candidates: usize,

    /// Scope assigned to market text with both or neither indicator.
    ///
    /// Default: broad.
    pub ambiguous_scope: MarketScope,

    /// Page fetch timeout. Default: 10s.
    #[serde(with = "duration_secs")]
    pub fetch_timeout: Duration,

    /// Requests per second per external provider. Default: 1.
    pub requests_per_second: u32,

    /// Retry policy for provider and fetch calls.
    pub retry: RetryPolicy,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            score_threshold: 30,
            fetch_headroom: 3,
            results_per_query: 10,
            max_communities: 15,
            min_story_points: 10,
            pricing_markdown_limit: 15_000,
            pricing_candidates: 3,
            ambiguous_scope: MarketScope::Broad,
            fetch_timeout: Duration::from_secs(10),
            requests_per_second: 1,
            retry: RetryPolicy::default(),
        }
    }
}

impl ResearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score_threshold(mut self, threshold: i32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_ambiguous_scope(mut self, scope: MarketScope) -> Self {
        self.ambiguous_scope = scope;
        self
    }

    pub fn with_pricing_markdown_limit(mut self, limit: usize) -> Self {
        self.pricing_markdown_limit = limit;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }
}

pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs.max(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::default();
        assert_eq!(config.score_threshold, 30);
        assert_eq!(config.max_communities, 15);
        assert_eq!(config.ambiguous_scope, MarketScope::Broad);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_roundtrips_through_json() {
        let config = ResearchConfig::new().with_fetch_timeout(Duration::from_millis(2500));
        let json = serde_json::to_string(&config).unwrap();
        let back: ResearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fetch_timeout, Duration::from_millis(2500));
    }
}
