//! Tavily-backed web searcher (primary provider).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::DEFAULT_TIMEOUT;
use crate::error::{SearchError, SearchResult};
use crate::security::SecretString;
use crate::traits::searcher::WebSearcher;
use crate::types::search::SearchHit;

const PROVIDER: &str = "tavily";
const ENDPOINT: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude_domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    search_depth: String,
    timeout: Duration,
}

impl TavilyWebSearcher {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            search_depth: "basic".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
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

    async fn request(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        let (query, exclude_domains) = split_exclusions(query);
        let request = TavilyRequest {
            query: &query,
            search_depth: &self.search_depth,
            max_results: limit,
            exclude_domains,
        };

        let response = self
            .client
            .post(ENDPOINT)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_status(PROVIDER, status.as_u16(), body));
        }

        let parsed: TavilyResponse = response.json().await.map_err(|e| SearchError::Decode {
            provider: PROVIDER.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| {
                SearchHit::new(
                    r.title.unwrap_or_default(),
                    r.url,
                    r.content.unwrap_or_default(),
                )
                .with_source(PROVIDER)
            })
            .collect())
    }
}

/// Tavily takes domain exclusions as a field rather than `-site:` operators.
fn split_exclusions(query: &str) -> (String, Vec<String>) {
    let mut excluded = Vec::new();
    let mut kept = Vec::new();
    for term in query.split_whitespace() {
        match term.strip_prefix("-site:") {
            Some(domain) if !domain.is_empty() => excluded.push(domain.to_string()),
            _ => kept.push(term),
        }
    }
    (kept.join(" "), excluded)
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        self.request(query, limit).await
    }
}
