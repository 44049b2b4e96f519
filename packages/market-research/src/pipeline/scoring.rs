//! Relevance scoring for competitor candidates.
//!
//! Web search for "competitors of X" returns mostly listicles, review
//! aggregators, forums and dev agencies. Scoring separates those from
//! genuine product homepages before anything is fetched; a coarser
//! content check confirms the survivors after fetching.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::domain::{domain_name_sans_tld, hostname, same_site};
use crate::types::search::SearchHit;

/// Neutral starting score.
pub const BASE_SCORE: i32 = 50;

/// Candidates below this are never fetched.
pub const SCORE_THRESHOLD: i32 = 30;

/// How much of a fetched page the product check looks at.
const PRODUCT_CHECK_CHARS: usize = 3000;

/// Content, review and social platforms. A hit on any of these (or a
/// subdomain) is never a competitor homepage.
const BLOCKED_DOMAINS: &[&str] = &[
    "reddit.com",
    "medium.com",
    "wikipedia.org",
    "g2.com",
    "capterra.com",
    "trustpilot.com",
    "crunchbase.com",
    "glassdoor.com",
    "yelp.com",
    "tracxn.com",
    "clutch.co",
    "goodfirms.co",
    "sourceforge.net",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "tiktok.com",
    "pinterest.com",
    "quora.com",
    "getapp.com",
    "softwareadvice.com",
    "producthunt.com",
    "forbes.com",
    "techcrunch.com",
    "substack.com",
    "ycombinator.com",
];

static CONTENT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)/(?:blog|articles?|top-|best-|category/|tag/|news/|reviews?/|comparison|vs/|resources/|guides?/|faq/)",
    )
    .unwrap()
});

static LISTICLE_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\btop\s+\d+|\bbest\s+\d+|\bbest\b.*\b(?:software|tools|apps|platforms|solutions)\b|\b\d+\s+best\b|\bhow\s+to\s+build\b|\bdevelopment\s+(?:company|services)\b|\w\s+vs\.?\s+\w|\balternatives?\s+to\b|\breview\s+of\b|\bcomparison\b",
    )
    .unwrap()
});

static AGENCY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:solutions|agency|consulting|development|developers|services|technologies|techno|soft|infotech)$",
    )
    .unwrap()
});

static FORUM_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)forum|community|discuss").unwrap());

static MAGAZINE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)magazine|journal|news|times|digest|insider|review").unwrap());

static PRODUCT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/(?:pricing|features|product|plans|demo|signup|sign-up|register|get-?started)\b")
        .unwrap()
});

static FIRST_PERSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bwe\s+offer\b|\bour\s+(?:platform|product|software|app|tool|solution|service)s?\b|\bsign\s?up\b|\bstart\b.{0,30}\bfree\s+trial\b|\bget\s+started\b|\btry\b.{0,20}\bfree\b",
    )
    .unwrap()
});

static CTA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bsign\s?up\b|\bsign\s?in\b|\blog\s?in\b|\bbook\s+a\s+demo\b|\brequest\s+a\s+demo\b|\bget\s+a\s+demo\b|\bget\s+started\b|\bstart\b.{0,30}\btrial\b|\btry\b.{0,20}\bfree\b",
    )
    .unwrap()
});

static PRICING_SIGNAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\s?\d|\bpricing\b|\bfree\s+plan\b|/\s*mo\b|\bper\s+month\b").unwrap()
});

/// Short branded names read as products.
const SHORT_NAME_MAX: usize = 12;
/// Looser bound used when deciding whether to rewrite a noisy URL.
const PRODUCT_DOMAIN_NAME_MAX: usize = 15;

/// Score a search hit for "is this a competitor's product page".
///
/// Blocked platforms and unparseable URLs score 0. Everything else starts
/// at [`BASE_SCORE`], each rule applies at most once, and the total is
/// floored at 0.
pub fn score_result(hit: &SearchHit) -> i32 {
    let Ok(url) = Url::parse(hit.url.trim()) else {
        return 0;
    };
    let Some(host) = hostname(url.as_str()) else {
        return 0;
    };
    if is_blocked_domain(&host) {
        return 0;
    }

    let name = domain_name_sans_tld(&host);
    let path = url.path();
    let mut score = BASE_SCORE;

    if CONTENT_PATH_RE.is_match(path) {
        score -= 20;
    }
    if LISTICLE_TITLE_RE.is_match(&hit.title) {
        score -= 25;
    }
    if AGENCY_NAME_RE.is_match(&name) {
        score -= 25;
    }
    // Subdomains count here: community.acme.io is a forum
    if FORUM_NAME_RE.is_match(&host) {
        score -= 30;
    }

    if name.chars().count() <= SHORT_NAME_MAX {
        score += 5;
    }
    if PRODUCT_PATH_RE.is_match(path) {
        score += 10;
    }
    if FIRST_PERSON_RE.is_match(&hit.snippet) {
        score += 15;
    }
    if path_segments(path) <= 1 {
        score += 5;
    }

    score.max(0)
}

pub fn is_blocked_domain(host: &str) -> bool {
    BLOCKED_DOMAINS.iter().any(|blocked| same_site(host, blocked))
}

fn path_segments(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// Post-fetch confirmation: at least two of call-to-action, pricing and
/// first-person product language in the top of the page.
pub fn is_product_page(markdown: &str) -> bool {
    let head: String = markdown.chars().take(PRODUCT_CHECK_CHARS).collect();

    let signals = [
        CTA_RE.is_match(&head),
        PRICING_SIGNAL_RE.is_match(&head),
        FIRST_PERSON_RE.is_match(&head),
    ];

    signals.iter().filter(|s| **s).count() >= 2
}

/// Short name that is not an agency, forum or magazine.
pub fn looks_like_product_domain(host: &str) -> bool {
    let name = domain_name_sans_tld(host);
    !name.is_empty()
        && name.chars().count() <= PRODUCT_DOMAIN_NAME_MAX
        && !AGENCY_NAME_RE.is_match(&name)
        && !FORUM_NAME_RE.is_match(host.strip_prefix("www.").unwrap_or(host))
        && !MAGAZINE_NAME_RE.is_match(&name)
}

/// Rewrite a content URL on a product-looking domain to the domain root.
///
/// Content pages on agency, forum or magazine domains are left alone, as
/// are unparseable URLs.
pub fn normalize_product_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw.trim()) else {
        return raw.to_string();
    };
    let Some(host) = url.host_str() else {
        return raw.to_string();
    };

    if CONTENT_PATH_RE.is_match(url.path()) && looks_like_product_domain(&host.to_lowercase()) {
        format!("{}/", url.origin().ascii_serialization())
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: &str, snippet: &str) -> SearchHit {
        SearchHit::new(title, url, snippet)
    }

    #[test]
    fn test_blocked_platforms_score_zero() {
        let glowing = "We offer the best platform. Sign up for a free trial.";
        for url in [
            "https://reddit.com/r/saas",
            "https://g2.com/products/acme",
            "https://www.g2.com/categories/crm",
            "https://en.wikipedia.org/wiki/CRM",
            "https://wikipedia.org/",
        ] {
            assert_eq!(score_result(&hit("Acme", url, glowing)), 0, "{}", url);
        }
    }

    #[test]
    fn test_product_homepage_beats_listicle() {
        let product = hit(
            "Acme - Scheduling for clinics",
            "https://acme.io/pricing",
            "Our platform automates bookings. Start your free trial today.",
        );
        let listicle = hit(
            "Top 10 scheduling tools in 2024",
            "https://somesite.com/blog/top-10-scheduling",
            "We compared dozens of options.",
        );

        let product_score = score_result(&product);
        let listicle_score = score_result(&listicle);
        // 50 + 5 short name + 10 product path + 15 first person + 5 shallow
        assert_eq!(product_score, 85);
        // 50 - 20 content path - 25 listicle + 5 short name
        assert_eq!(listicle_score, 10);
        assert!(product_score > listicle_score);
        assert!(listicle_score < SCORE_THRESHOLD);
    }

    #[test]
    fn test_agency_and_forum_penalties() {
        // Names longer than 12 chars, root path: only the shallow-path bonus applies
        let agency = hit("App builders", "https://bestappsolutions.com/", "");
        assert_eq!(score_result(&agency), 50 - 25 + 5);

        let forum = hit("Discuss", "https://carwashforums.com/", "");
        assert_eq!(score_result(&forum), 50 - 30 + 5);
    }

    #[test]
    fn test_forum_subdomains_penalized() {
        let product = score_result(&hit("Acme", "https://acme.io/", ""));
        assert_eq!(product, 50 + 5 + 5);

        for url in [
            "https://forum.acme.io/",
            "https://community.acme.io/",
            "https://www.discuss.acme.io/",
        ] {
            assert_eq!(score_result(&hit("Acme", url, "")), 50 - 30 + 5 + 5, "{url}");
        }
    }

    #[test]
    fn test_unparseable_url_scores_zero() {
        assert_eq!(score_result(&hit("Acme", "not a url", "")), 0);
    }

    #[test]
    fn test_score_floor() {
        let worst = hit(
            "Top 10 best apps vs alternatives",
            "https://mobiledevelopmentcommunityforum.com/blog/top-10-apps/page/2",
            "",
        );
        assert_eq!(score_result(&worst), 0);
    }

    #[test]
    fn test_is_product_page_needs_two_signals() {
        assert!(is_product_page(
            "# Acme\nOur platform handles scheduling.\n[Sign up](/signup)"
        ));
        assert!(is_product_page("Plans from $9/mo. Get started in minutes."));
        assert!(!is_product_page("# Ten tools we tried\nHere is a list of tools."));
        assert!(!is_product_page("Log in to read the newsletter"));
    }

    #[test]
    fn test_normalize_product_url() {
        assert_eq!(
            normalize_product_url("https://acme.io/blog/launch-week"),
            "https://acme.io/"
        );
        assert_eq!(
            normalize_product_url("https://acme.io/pricing"),
            "https://acme.io/pricing"
        );
        assert_eq!(
            normalize_product_url("https://techmagazine.com/blog/top-apps"),
            "https://techmagazine.com/blog/top-apps"
        );
        assert_eq!(
            normalize_product_url("https://appdevsolutions.com/resources/guide"),
            "https://appdevsolutions.com/resources/guide"
        );
        assert_eq!(normalize_product_url("::not-a-url"), "::not-a-url");
    }

    #[test]
    fn test_looks_like_product_domain() {
        assert!(looks_like_product_domain("linear.app"));
        assert!(!looks_like_product_domain("saascommunity.com"));
        assert!(!looks_like_product_domain("community.hubspot.com"));
        assert!(!looks_like_product_domain("www.forum.acme.io"));
        assert!(!looks_like_product_domain("averyveryverylongbrandname.com"));
    }
}
