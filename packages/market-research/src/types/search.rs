//! Search hits and their scored form.

use serde::{Deserialize, Serialize};

/// A single result from a web search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Snippet/description from the provider.
    pub snippet: String,
    /// Provider tag ("tavily", "brave", "category-listing", ...).
    pub source: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source: String::new(),
        }
    }

    /// Tag the provider that produced this hit.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Extra relevance evidence attached to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceBonus {
    /// Appeared in a curated category listing.
    CategoryListing,
    /// Found by both general web search and category-listing mining.
    MultiSource,
}

impl SourceBonus {
    pub fn points(self) -> i32 {
        match self {
            SourceBonus::CategoryListing => 15,
            SourceBonus::MultiSource => 20,
        }
    }
}

/// A search hit with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub hit: SearchHit,
    pub score: i32,
    #[serde(default)]
    pub bonuses: Vec<SourceBonus>,
}

impl ScoredCandidate {
    pub fn new(hit: SearchHit, score: i32) -> Self {
        Self {
            hit,
            score,
            bonuses: Vec::new(),
        }
    }

    /// Add a bonus and its points. Disqualified (zero-score) candidates stay at zero.
    pub fn with_bonus(mut self, bonus: SourceBonus) -> Self {
        if !self.bonuses.contains(&bonus) {
            self.bonuses.push(bonus);
            if self.score > 0 {
                self.score += bonus.points();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_applied_once() {
        let hit = SearchHit::new("Acme", "https://acme.io", "");
        let candidate = ScoredCandidate::new(hit, 50)
            .with_bonus(SourceBonus::CategoryListing)
            .with_bonus(SourceBonus::CategoryListing)
            .with_bonus(SourceBonus::MultiSource);
        assert_eq!(candidate.score, 85);
        assert_eq!(candidate.bonuses.len(), 2);
    }

    #[test]
    fn test_bonus_does_not_revive_disqualified() {
        let hit = SearchHit::new("r/saas", "https://reddit.com/r/saas", "");
        let candidate = ScoredCandidate::new(hit, 0).with_bonus(SourceBonus::MultiSource);
        assert_eq!(candidate.score, 0);
    }
}
