//! Competitor records.

use serde::{Deserialize, Serialize};

/// Maximum number of features kept per competitor or tier.
pub const MAX_FEATURES: usize = 5;

/// A discovered competitor, one per unique domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl Competitor {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
            tagline: None,
            features: None,
        }
    }

    pub fn with_tagline(mut self, tagline: Option<String>) -> Self {
        self.tagline = tagline;
        self
    }

    /// Attach features, keeping at most [`MAX_FEATURES`]. Empty lists are dropped.
    pub fn with_features(mut self, mut features: Vec<String>) -> Self {
        features.truncate(MAX_FEATURES);
        self.features = (!features.is_empty()).then_some(features);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_capped() {
        let features = (0..8).map(|i| format!("Feature number {}", i)).collect();
        let competitor = Competitor::new("Acme", "https://acme.io", "").with_features(features);
        assert_eq!(competitor.features.unwrap().len(), MAX_FEATURES);
    }

    #[test]
    fn test_empty_features_omitted() {
        let competitor = Competitor::new("Acme", "https://acme.io", "").with_features(vec![]);
        assert!(competitor.features.is_none());
        let json = serde_json::to_value(&competitor).unwrap();
        assert!(json.get("features").is_none());
    }
}
