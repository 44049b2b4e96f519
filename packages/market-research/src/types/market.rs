//! Market-size estimate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of sources attached to an estimate.
pub const MAX_SOURCES: usize = 5;

/// Whether a figure describes a digital sub-segment or a whole industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketScope {
    Narrow,
    Broad,
}

impl fmt::Display for MarketScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketScope::Narrow => f.write_str("narrow"),
            MarketScope::Broad => f.write_str("broad"),
        }
    }
}

/// A dollar figure tagged with the scope of the sentence it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopedFigure {
    /// Value in USD.
    pub value: f64,
    pub scope: MarketScope,
}

impl ScopedFigure {
    pub fn new(value: f64, scope: MarketScope) -> Self {
        Self { value, scope }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Medium => f.write_str("medium"),
            Confidence::Low => f.write_str("low"),
        }
    }
}

/// Geographic focus for market sizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geography {
    #[default]
    Global,
    Us,
    Eu,
    Apac,
}

impl Geography {
    /// Phrase appended to search queries, if any.
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            Geography::Global => None,
            Geography::Us => Some("United States"),
            Geography::Eu => Some("Europe"),
            Geography::Apac => Some("Asia Pacific"),
        }
    }
}

/// A formatted low/high range for one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRange {
    pub low: String,
    pub high: String,
    pub description: String,
}

/// A search hit cited as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSizeEstimate {
    pub low: String,
    pub high: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrow_estimate: Option<SubRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broad_estimate: Option<SubRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<String>,
    pub confidence: Confidence,
    pub sources: Vec<SourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MarketSizeEstimate {
    /// The soft-failure result: no data, low confidence, and a reason.
    pub fn unknown(note: impl Into<String>) -> Self {
        Self {
            low: "Unknown".to_string(),
            high: "Unknown".to_string(),
            narrow_estimate: None,
            broad_estimate: None,
            growth_rate: None,
            confidence: Confidence::Low,
            sources: Vec::new(),
            note: Some(note.into()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.low == "Unknown" && self.high == "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_estimate() {
        let estimate = MarketSizeEstimate::unknown("No search results");
        assert!(estimate.is_unknown());
        assert_eq!(estimate.confidence, Confidence::Low);
        assert!(estimate.sources.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(MarketSizeEstimate::unknown("none")).unwrap();
        assert_eq!(json["confidence"], "low");
        assert_eq!(json["low"], "Unknown");
        assert!(json.get("narrow_estimate").is_none());
    }

    #[test]
    fn test_geography_qualifier() {
        assert_eq!(Geography::Global.qualifier(), None);
        assert_eq!(Geography::Eu.qualifier(), Some("Europe"));
        let geo: Geography = serde_json::from_str("\"apac\"").unwrap();
        assert_eq!(geo, Geography::Apac);
    }
}
