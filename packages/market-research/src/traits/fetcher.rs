//! Page fetcher trait: HTML in, markdown out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::FetchResult;

/// A fetched page converted to markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub markdown: String,
    pub title: Option<String>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            markdown: markdown.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn has_content(&self) -> bool {
        !self.markdown.trim().is_empty()
    }
}

/// Fetch a single page.
///
/// Non-success statuses are errors, so callers can fall through to the
/// next candidate URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        (**self).fetch(url).await
    }
}
