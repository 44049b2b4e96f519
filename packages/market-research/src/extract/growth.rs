//! Growth-rate extraction.

use regex::Regex;
use std::sync::LazyLock;

static GROWTH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "12% CAGR", "12.5 % compound annual growth"
        r"(?i)(\d{1,3}(?:\.\d+)?)\s*%\s*(?:\(\s*)?(?:cagr|compound annual growth)",
        // "CAGR of 12%", "CAGR: 12%", "CAGR of about 12%"
        r"(?i)\bcagr\b[^\d%]{0,25}?(\d{1,3}(?:\.\d+)?)\s*%",
        // "growing at 12%", "growth rate of 12%", "grow by 12%"
        r"(?i)\bgrow(?:th|ing|s)?\b(?:\s+rate)?\s+(?:of|at|by)\s+(?:an?\s+)?(?:\w+\s+){0,3}?(\d{1,3}(?:\.\d+)?)\s*%",
        // "12% annual growth", "12% growth"
        r"(?i)(\d{1,3}(?:\.\d+)?)\s*%\s+(?:annual\s+|yearly\s+|year-over-year\s+)?growth",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// The first growth percentage associated with "CAGR" or "growth" in `text`,
/// formatted like `"12.5%"`.
pub fn extract_growth_rate(text: &str) -> Option<String> {
    GROWTH_PATTERNS
        .iter()
        .filter_map(|re| re.captures(text))
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let rate = cap.get(1)?;
            Some((whole.start(), rate.as_str()))
        })
        .min_by_key(|(start, _)| *start)
        .map(|(_, rate)| format!("{}%", rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_before_cagr() {
        assert_eq!(
            extract_growth_rate("expanding at 12% CAGR through 2030"),
            Some("12%".to_string())
        );
    }

    #[test]
    fn test_cagr_before_percent() {
        assert_eq!(
            extract_growth_rate("with a CAGR of 8.4% from 2024 to 2032"),
            Some("8.4%".to_string())
        );
    }

    #[test]
    fn test_growing_at() {
        assert_eq!(
            extract_growth_rate("The market is growing at 15% annually"),
            Some("15%".to_string())
        );
        assert_eq!(
            extract_growth_rate("growth rate of 6.2% expected"),
            Some("6.2%".to_string())
        );
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Revenue grew 40% last year. The segment posts 9% CAGR. Also 20% growth.";
        assert_eq!(extract_growth_rate(text), Some("9%".to_string()));
    }

    #[test]
    fn test_no_growth_mention() {
        assert_eq!(extract_growth_rate("The market is worth $5 billion"), None);
        assert_eq!(extract_growth_rate("20% of users churn"), None);
    }
}
