//! Narrow vs. broad market-scope classification.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::market::MarketScope;

/// Scope for text with both or neither indicator.
///
/// Broad, because overstating the addressable digital slice is the worse
/// reporting error. Tunable per call via [`classify_scope_with`].
pub const AMBIGUOUS_SCOPE_DEFAULT: MarketScope = MarketScope::Broad;

static NARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:digital|online|platforms?|saas|software|apps?|mobile|on-demand|on demand|subscription|marketplaces?|e-commerce|cloud-based|web-based)\b",
    )
    .unwrap()
});

static BROAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:industry|industries|sector|total market|overall market|traditional|entire market)\b")
        .unwrap()
});

/// Classify with the default policy for ambiguous text.
pub fn classify_scope(text: &str) -> MarketScope {
    classify_scope_with(text, AMBIGUOUS_SCOPE_DEFAULT)
}

/// Narrow-only → narrow, broad-only → broad, otherwise `ambiguous`.
pub fn classify_scope_with(text: &str, ambiguous: MarketScope) -> MarketScope {
    match (NARROW_RE.is_match(text), BROAD_RE.is_match(text)) {
        (true, false) => MarketScope::Narrow,
        (false, true) => MarketScope::Broad,
        _ => ambiguous,
    }
}

/// Split text into sentences on `.`/`!`/`?` followed by whitespace, and on
/// newlines. Decimal points inside numbers don't split.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let boundary = match c {
            '\n' => Some(i),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(i + c.len_utf8()),
                None => Some(i + c.len_utf8()),
                _ => None,
            },
            _ => None,
        };

        if let Some(end) = boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = if c == '\n' { i + 1 } else { end };
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow() {
        assert_eq!(classify_scope("mobile car wash app market"), MarketScope::Narrow);
        assert_eq!(classify_scope("the SaaS invoicing segment"), MarketScope::Narrow);
    }

    #[test]
    fn test_broad() {
        assert_eq!(classify_scope("car wash services industry"), MarketScope::Broad);
        assert_eq!(classify_scope("the total market for dental care"), MarketScope::Broad);
    }

    #[test]
    fn test_ambiguous_defaults_to_broad() {
        assert_eq!(classify_scope("digital platforms reshape the retail industry"), MarketScope::Broad);
        assert_eq!(classify_scope("car washes earned $14 billion"), MarketScope::Broad);
    }

    #[test]
    fn test_ambiguous_policy_is_tunable() {
        assert_eq!(
            classify_scope_with("car washes earned $14 billion", MarketScope::Narrow),
            MarketScope::Narrow
        );
        // Unambiguous text ignores the policy
        assert_eq!(
            classify_scope_with("car wash services industry", MarketScope::Narrow),
            MarketScope::Broad
        );
    }

    #[test]
    fn test_split_sentences_keeps_decimals() {
        let text = "The app market hit $1.5 billion. The industry is $40 billion!\nGrowth is 9%";
        assert_eq!(
            split_sentences(text),
            vec![
                "The app market hit $1.5 billion.",
                "The industry is $40 billion!",
                "Growth is 9%"
            ]
        );
    }
}
