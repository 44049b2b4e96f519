//! Ordered provider fallback.
//!
//! Tries each provider in order and stops at the first one that returns
//! hits. Errors are collected so a total failure can say what went wrong
//! everywhere.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{SearchError, SearchResult};
use crate::traits::searcher::WebSearcher;
use crate::types::search::SearchHit;

pub struct FallbackSearcher {
    providers: Vec<Arc<dyn WebSearcher>>,
}

impl FallbackSearcher {
    pub fn new(providers: Vec<Arc<dyn WebSearcher>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

#[async_trait]
impl WebSearcher for FallbackSearcher {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn search_with_limit(&self, query: &str, limit: usize) -> SearchResult<Vec<SearchHit>> {
        if self.providers.is_empty() {
            return Err(SearchError::NotConfigured);
        }

        let mut errors = Vec::new();
        let mut any_succeeded = false;

        for provider in &self.providers {
            match provider.search_with_limit(query, limit).await {
                Ok(hits) if !hits.is_empty() => {
                    debug!(
                        provider = provider.name(),
                        query = %query,
                        hits = hits.len(),
                        "Search provider answered"
                    );
                    return Ok(hits);
                }
                Ok(_) => {
                    any_succeeded = true;
                    debug!(provider = provider.name(), query = %query, "Search provider returned no hits");
                }
                Err(e) => {
                    warn!(provider = provider.name(), query = %query, error = %e, "Search provider failed");
                    errors.push(format!("{}: {}", provider.name(), e));
                }
            }
        }

        if any_succeeded {
            Ok(Vec::new())
        } else {
            Err(SearchError::AllProvidersFailed(errors))
        }
    }
}
