//! Brave Search web searcher (secondary provider).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::DEFAULT_TIMEOUT;
use crate::error::{SearchError, SearchResult};
use crate::security::SecretString;
use crate::traits::searcher::WebSearcher;
use crate::types::search::SearchHit;

const PROVIDER: &str = "brave";
const ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave caps `count` at 20.
const MAX_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

pub struct BraveWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    timeout: Duration,
}

impl BraveWebSearcher {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
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

    async fn request(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        let count = limit.clamp(1, MAX_COUNT).to_string();
        let response = self
            .client
            .get(ENDPOINT)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", self.api_key.expose())
            .query(&[("q", query), ("count", count.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_status(PROVIDER, status.as_u16(), body));
        }

        let parsed: BraveResponse = response.json().await.map_err(|e| SearchError::Decode {
            provider: PROVIDER.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parsed
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .map(|r| SearchHit::new(strip_tags(&r.title), r.url, strip_tags(&r.description)).with_source(PROVIDER))
            .collect())
    }
}

/// Brave wraps matched terms in `<strong>`.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&amp;", "&").replace("&#x27;", "'").replace("&quot;", "\"")
}

#[async_trait]
impl WebSearcher for BraveWebSearcher {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        self.request(query, limit).await
    }
}
