//! Heuristic tagline and feature extraction from landing-page markdown.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::competitor::MAX_FEATURES;

/// Only the top of the page is considered for a tagline.
const TAGLINE_WINDOW_CHARS: usize = 500;
const TAGLINE_MAX_LINES: usize = 5;
const LINE_MIN_CHARS: usize = 10;
const LINE_MAX_CHARS: usize = 100;

static AUTH_CHROME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:log\s?in|sign\s?in|sign\s?up|register|create\s+(?:an\s+)?account)\b").unwrap()
});

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:log\s?in|sign\s?in|sign\s?up|terms(?:\s+of\s+(?:service|use))?|privacy|cookie|copyright|all\s+rights\s+reserved)\b",
    )
    .unwrap()
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•])\s+(.+?)\s*$").unwrap());

/// First short, non-navigational line near the top of the page.
pub fn extract_tagline(markdown: &str) -> Option<String> {
    let window: String = markdown.chars().take(TAGLINE_WINDOW_CHARS).collect();

    window
        .lines()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .filter(|line| !line.is_empty())
        .take(TAGLINE_MAX_LINES)
        .find(|line| {
            let len = line.chars().count();
            (LINE_MIN_CHARS..=LINE_MAX_CHARS).contains(&len)
                && !line.contains('|')
                && !line.starts_with("![")
                && !AUTH_CHROME_RE.is_match(line)
        })
        .map(str::to_string)
}

/// Up to five bullet lines that read like product features.
pub fn extract_features(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| BULLET_RE.captures(line))
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|text| {
            let len = text.chars().count();
            (LINE_MIN_CHARS..=LINE_MAX_CHARS).contains(&len) && !BOILERPLATE_RE.is_match(text)
        })
        .take(MAX_FEATURES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagline_skips_navigation() {
        let md = "Home | Product | Pricing\n\n# Acme\n## Ship faster with automated QA\nMore text";
        assert_eq!(
            extract_tagline(md).as_deref(),
            Some("Ship faster with automated QA")
        );
    }

    #[test]
    fn test_tagline_skips_auth_and_images() {
        let md = "![logo](https://acme.io/logo.png)\nLog in to your dashboard\nScheduling for busy clinics";
        assert_eq!(
            extract_tagline(md).as_deref(),
            Some("Scheduling for busy clinics")
        );
    }

    #[test]
    fn test_tagline_only_looks_at_first_lines() {
        let md = "a\nb\nc\nd\ne\nThis line is long enough but too late";
        assert_eq!(extract_tagline(md), None);
    }

    #[test]
    fn test_features_filter_boilerplate() {
        let md = "- Real-time collaboration\n- Terms of Service\n* Sign up today for free\n• Offline mode for mobile\n- short\n";
        assert_eq!(
            extract_features(md),
            vec![
                "Real-time collaboration".to_string(),
                "Offline mode for mobile".to_string()
            ]
        );
    }

    #[test]
    fn test_features_capped() {
        let md = (1..=8)
            .map(|i| format!("- Feature number {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_features(&md).len(), 5);
    }
}
