//! Forum-style full-text search (stories with engagement counters).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::SearchResult;

/// A story-like record from a forum search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    /// Link the story points at, if any.
    pub url: Option<String>,
    pub points: u32,
    pub num_comments: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Story {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            points: 0,
            num_comments: 0,
            created_at: None,
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_comments(mut self, num_comments: u32) -> Self {
        self.num_comments = num_comments;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Discussion page for this story on Hacker News.
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }
}

#[async_trait]
pub trait StorySearcher: Send + Sync {
    fn name(&self) -> &str;

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>>;
}

#[async_trait]
impl<T: StorySearcher + ?Sized> StorySearcher for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn search_stories(&self, query: &str, limit: usize) -> SearchResult<Vec<Story>> {
        (**self).search_stories(query, limit).await
    }
}
