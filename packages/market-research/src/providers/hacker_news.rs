//! Hacker News full-text search via the Algolia API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::DEFAULT_TIMEOUT;
use crate::error::{SearchError, SearchResult};
use crate::traits::stories::{Story, StorySearcher};

const PROVIDER: &str = "hackernews";
const ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";

#[derive(Debug, Deserialize)]
struct AlgoliaResponse {
    #[serde(default)]
    hits: Vec<AlgoliaHit>,
}

#[derive(Debug, Deserialize)]
struct AlgoliaHit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    points: Option<u32>,
    #[serde(default)]
    num_comments: Option<u32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<AlgoliaHit> for Story {
    fn from(hit: AlgoliaHit) -> Self {
        Story {
            id: hit.object_id,
            title: hit.title.unwrap_or_default(),
            url: hit.url.filter(|u| !u.is_empty()),
            points: hit.points.unwrap_or(0),
            num_comments: hit.num_comments.unwrap_or(0),
            created_at: hit.created_at,
        }
    }
}

pub struct HackerNewsSearcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for HackerNewsSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HackerNewsSearcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Bound every request, connect included. Default: 10s.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        let hits_per_page = limit.max(1).to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("query", query),
                ("tags", "story"),
                ("hitsPerPage", hits_per_page.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_status(PROVIDER, status.as_u16(), body));
        }

        let parsed: AlgoliaResponse = response.json().await.map_err(|e| SearchError::Decode {
            provider: PROVIDER.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parsed
            .hits
            .into_iter()
            .map(Story::from)
            .filter(|s| !s.title.is_empty())
            .collect())
    }
}

#[async_trait]
impl StorySearcher for HackerNewsSearcher {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        self.request(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algolia_hits() {
        let json = r#"{
            "hits": [
                {"objectID": "123", "title": "Show HN: Invoicing for freelancers", "url": "https://example.com",
                 "points": 42, "num_comments": 17, "created_at": "2024-03-01T12:00:00.000Z"},
                {"objectID": "456", "title": null, "points": null}
            ]
        }"#;
        let parsed: AlgoliaResponse = serde_json::from_str(json).unwrap();
        let stories: Vec<Story> = parsed.hits.into_iter().map(Story::from).collect();

        assert_eq!(stories[0].points, 42);
        assert_eq!(stories[0].num_comments, 17);
        assert_eq!(stories[0].discussion_url(), "https://news.ycombinator.com/item?id=123");
        assert!(stories[0].created_at.is_some());
        assert_eq!(stories[1].points, 0);
        assert!(stories[1].title.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let searcher = HackerNewsSearcher::new();
        let stories = searcher.search_stories("freelance invoicing", 5).await.unwrap();
        assert!(!stories.is_empty());
    }
}
