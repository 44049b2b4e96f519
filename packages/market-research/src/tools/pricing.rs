//! Pricing page extraction.
//!
//! Never fails: an unreachable page comes back as a `PricingPage` whose
//! content and hints describe the failure, so reports can treat it as data.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::extract::extract_structured_pricing;
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::types::config::ResearchConfig;
use crate::types::pricing::{PricingPage, StructuredPricing};
use crate::types::requests::PricingRequest;

/// Paths tried, in order, when the URL is not already a pricing page.
pub const PRICING_PATHS: &[&str] = &["/pricing", "/price", "/plans", "/subscription"];

pub const TRUNCATION_MARKER: &str = "\n\n[... content truncated]";

/// A newline past this share of the limit is a clean place to cut.
const NEWLINE_CUT_RATIO: f64 = 0.8;

static PRICING_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/(?:pricing|prices?|plans|subscriptions?|billing)\b").unwrap());

static FREE_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfree\s+(?:plan|tier|forever|trial)\b|\$0\b").unwrap());
static ENTERPRISE_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\benterprise\b").unwrap());
static MONTHLY_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/\s*mo(?:nth)?\b|\bper\s+month\b|\bmonthly\b").unwrap());
static ANNUAL_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/\s*(?:yr|year)\b|\bper\s+year\b|\bannual(?:ly)?\b|\byearly\b").unwrap()
});
static PER_SEAT_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bper\s+(?:user|seat|member|workspace)\b|/\s*(?:user|seat|workspace)\b").unwrap()
});
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+\S").unwrap());

/// Fetch a pricing page and extract what it says about pricing.
pub async fn extract_pricing(
    fetcher: &dyn PageFetcher,
    config: &ResearchConfig,
    request: &PricingRequest,
) -> PricingPage {
    let url = request.url.trim();
    let name = request.competitor_name.clone();

    if let Err(e) = request.validate() {
        warn!(url = %url, error = %e, "Rejected pricing URL");
        return PricingPage::failed(url, name, &e.to_string());
    }

    info!(url = %url, competitor = ?name, "Extracting pricing");

    let page = match fetch_pricing_page(fetcher, url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url = %url, error = %e, "Pricing fetch failed");
            return PricingPage::failed(url, name, &e.to_string());
        }
    };

    // Extraction sees the full page; only the returned content is truncated.
    let structured = extract_structured_pricing(&page.markdown);
    let hints = pricing_hints(&page.markdown, &structured);
    debug!(url = %page.url, tiers = structured.tiers.len(), "Pricing extracted");

    PricingPage {
        url: page.url,
        competitor_name: name,
        markdown_content: truncate_markdown(&page.markdown, config.pricing_markdown_limit),
        extraction_hints: hints,
        structured_pricing: Some(structured),
    }
}

/// Candidate URLs in the order they are tried.
pub fn candidate_urls(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return vec![url.to_string()];
    };
    if PRICING_URL_RE.is_match(parsed.path()) {
        return vec![url.to_string()];
    }

    let origin = parsed.origin().ascii_serialization();
    PRICING_PATHS
        .iter()
        .map(|path| format!("{}{}", origin, path))
        .chain(std::iter::once(url.to_string()))
        .collect()
}

async fn fetch_pricing_page(fetcher: &dyn PageFetcher, url: &str) -> FetchResult<FetchedPage> {
    let mut last_error: Option<FetchError> = None;

    for candidate in candidate_urls(url) {
        match fetcher.fetch(&candidate).await {
            Ok(page) if page.has_content() => return Ok(page),
            Ok(_) => debug!(url = %candidate, "Empty pricing candidate"),
            // Blocked by the SSRF guard: no other path on this host will pass
            Err(e @ FetchError::Security(_)) => return Err(e),
            Err(e) => {
                debug!(url = %candidate, error = %e, "Pricing candidate failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| FetchError::InvalidUrl {
        url: url.to_string(),
    }))
}

/// Cut `markdown` to at most `limit` characters plus a marker.
///
/// Cuts at the last newline when one falls past 80% of the limit, otherwise
/// exactly at the limit.
pub fn truncate_markdown(markdown: &str, limit: usize) -> String {
    if markdown.chars().count() <= limit {
        return markdown.to_string();
    }

    let byte_limit = markdown
        .char_indices()
        .nth(limit)
        .map(|(idx, _)| idx)
        .unwrap_or(markdown.len());
    let head = &markdown[..byte_limit];

    let threshold = (limit as f64 * NEWLINE_CUT_RATIO) as usize;
    let cut = match head.rfind('\n') {
        Some(idx) if head[..idx].chars().count() > threshold => &head[..idx],
        _ => head,
    };

    format!("{}{}", cut, TRUNCATION_MARKER)
}

/// Short description of the pricing for a reader skimming the result.
pub fn pricing_hints(markdown: &str, structured: &StructuredPricing) -> String {
    if !structured.tiers.is_empty() {
        return structured_summary(structured);
    }

    let mut hints = Vec::new();
    if FREE_HINT_RE.is_match(markdown) {
        hints.push("Mentions a free tier or trial".to_string());
    }
    if ENTERPRISE_HINT_RE.is_match(markdown) {
        hints.push("Mentions enterprise plans".to_string());
    }
    if MONTHLY_HINT_RE.is_match(markdown) {
        hints.push("Monthly pricing mentioned".to_string());
    }
    if ANNUAL_HINT_RE.is_match(markdown) {
        hints.push("Annual pricing mentioned".to_string());
    }
    if PER_SEAT_HINT_RE.is_match(markdown) {
        hints.push("Per-user or per-workspace pricing".to_string());
    }
    let headings = HEADING_RE.find_iter(markdown).count();
    if headings > 0 {
        hints.push(format!("{} headings (possible tiers)", headings));
    }

    if hints.is_empty() {
        "No pricing signals found".to_string()
    } else {
        hints.join("; ")
    }
}

fn structured_summary(structured: &StructuredPricing) -> String {
    let tiers = structured
        .tiers
        .iter()
        .map(|tier| match &tier.price {
            Some(price) => format!("{} ({})", tier.name, price),
            None => tier.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts = vec![format!("{} tiers: {}", structured.tiers.len(), tiers)];
    if structured.has_free_tier {
        parts.push("free tier available".to_string());
    }
    if structured.has_enterprise {
        parts.push("enterprise tier".to_string());
    }
    if let Some(model) = structured.pricing_model {
        parts.push(format!("model: {}", model));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPageFetcher;

    const PRICING_MD: &str = "# Pricing\n\n## Free\n$0/mo\n\n## Pro\n$29/mo\n- Unlimited projects\n\n## Enterprise\nContact sales";

    #[test]
    fn test_truncate_exact_when_no_late_newline() {
        let blob = "a".repeat(2000);
        let out = truncate_markdown(&blob, 1000);
        assert_eq!(out, format!("{}{}", "a".repeat(1000), TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncate_at_late_newline() {
        let blob = format!("{}\n{}", "a".repeat(900), "b".repeat(1099));
        assert_eq!(blob.len(), 2000);
        let out = truncate_markdown(&blob, 1000);
        assert_eq!(out, format!("{}{}", "a".repeat(900), TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncate_ignores_early_newline() {
        let blob = format!("{}\n{}", "a".repeat(500), "b".repeat(1499));
        let out = truncate_markdown(&blob, 1000);
        assert_eq!(out.chars().count(), 1000 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_short_markdown_untouched() {
        assert_eq!(truncate_markdown("short", 1000), "short");
    }

    #[test]
    fn test_candidate_urls() {
        assert_eq!(
            candidate_urls("https://acme.io/"),
            vec![
                "https://acme.io/pricing",
                "https://acme.io/price",
                "https://acme.io/plans",
                "https://acme.io/subscription",
                "https://acme.io/",
            ]
        );
        assert_eq!(candidate_urls("https://acme.io/pricing"), vec!["https://acme.io/pricing"]);
    }

    #[tokio::test]
    async fn test_falls_back_through_paths() {
        let fetcher = MockPageFetcher::new().with_page("https://acme.io/plans", PRICING_MD);
        let page = extract_pricing(
            &fetcher,
            &ResearchConfig::default(),
            &PricingRequest::new("https://acme.io").with_competitor_name("Acme"),
        )
        .await;

        assert!(page.is_fetched());
        assert_eq!(page.url, "https://acme.io/plans");
        assert_eq!(page.competitor_name.as_deref(), Some("Acme"));
        let structured = page.structured_pricing.unwrap();
        assert_eq!(structured.tiers.len(), 3);
        assert!(structured.has_free_tier);
        assert!(structured.has_enterprise);
        assert!(page.extraction_hints.starts_with("3 tiers: Free ($0/mo), Pro ($29/mo), Enterprise"));
        assert_eq!(
            fetcher.calls(),
            vec!["https://acme.io/pricing", "https://acme.io/price", "https://acme.io/plans"]
        );
    }

    #[tokio::test]
    async fn test_structured_pricing_uses_untruncated_markdown() {
        let long = format!("{}\n{}", "x".repeat(200), PRICING_MD);
        let fetcher = MockPageFetcher::new().with_page("https://acme.io/pricing", &long);
        let config = ResearchConfig::default().with_pricing_markdown_limit(100);

        let page = extract_pricing(&fetcher, &config, &PricingRequest::new("https://acme.io/pricing")).await;

        assert!(page.markdown_content.ends_with(TRUNCATION_MARKER));
        assert_eq!(page.structured_pricing.unwrap().tiers.len(), 3);
    }

    #[tokio::test]
    async fn test_failure_is_encoded_not_thrown() {
        let fetcher = MockPageFetcher::new();
        let page = extract_pricing(
            &fetcher,
            &ResearchConfig::default(),
            &PricingRequest::new("https://gone.example/pricing"),
        )
        .await;

        assert!(!page.is_fetched());
        assert!(page.markdown_content.starts_with("Failed to fetch pricing page"));
        assert!(page.extraction_hints.starts_with("Pricing extraction failed"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_encoded() {
        let page = extract_pricing(
            &MockPageFetcher::new(),
            &ResearchConfig::default(),
            &PricingRequest::new("not a url"),
        )
        .await;
        assert!(!page.is_fetched());
        assert!(page.extraction_hints.contains("invalid input"));
    }

    #[test]
    fn test_regex_hints_without_tiers() {
        let md = "Billed annually. Free trial for 14 days. Enterprise options. $8 per user.";
        let hints = pricing_hints(md, &StructuredPricing::default());
        assert!(hints.contains("free tier"));
        assert!(hints.contains("enterprise"));
        assert!(hints.contains("Annual"));
        assert!(hints.contains("Per-user"));
    }
}
