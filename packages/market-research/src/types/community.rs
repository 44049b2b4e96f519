//! Online community records.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    HackerNews,
    Reddit,
    Discord,
    Forum,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::HackerNews => "HackerNews",
            Platform::Reddit => "Reddit",
            Platform::Discord => "Discord",
            Platform::Forum => "Forum",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub platform: Platform,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member count or engagement summary, as reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<String>,
}

impl Community {
    pub fn new(platform: Platform, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform,
            name: name.into(),
            url: url.into(),
            description: None,
            member_count: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    pub fn with_member_count(mut self, count: impl Into<String>) -> Self {
        self.member_count = Some(count.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serializes_as_name() {
        let community = Community::new(Platform::HackerNews, "Show HN", "https://news.ycombinator.com/item?id=1");
        let json = serde_json::to_value(&community).unwrap();
        assert_eq!(json["platform"], "HackerNews");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_blank_description_dropped() {
        let community = Community::new(Platform::Reddit, "r/saas", "https://reddit.com/r/saas")
            .with_description("  ");
        assert!(community.description.is_none());
    }
}
