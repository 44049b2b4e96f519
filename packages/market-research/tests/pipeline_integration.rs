//! Integration tests for the result-quality pipeline.
//!
//! These tests drive the public API end to end with mock providers:
//! 1. Competitor discovery from web search plus a category listing
//! 2. Community discovery with one provider down
//! 3. The heuristics the orchestrators depend on

use market_research::{
    extract::{classify_scope, extract_dollar_figures, extract_structured_pricing},
    find_communities, search_competitors,
    pipeline::{dedupe_by_url, filter_outliers, score_result},
    testing::{MockPageFetcher, MockStorySearcher, MockWebSearcher},
    tools::truncate_markdown,
    CommunityRequest, CompetitorRequest, MarketScope, Platform, ResearchConfig, SearchHit, Story,
};

const PRODUCT_PAGE: &str = "# Book dental visits in seconds\n\
    Our platform fills your chair with new patients.\n\
    - Online booking for every location\n\
    [Start free trial](/signup)";

const LISTING_URL: &str = "https://www.g2.com/categories/dental-practice-management";

/// Helper to create a search hit.
fn hit(title: &str, url: &str, snippet: &str) -> SearchHit {
    SearchHit::new(title, url, snippet)
}

#[tokio::test]
async fn test_competitors_from_web_and_category_listing() {
    let searcher = MockWebSearcher::new()
        .with_results(
            "site:g2.com/categories",
            vec![hit("Best Dental Practice Management Software", LISTING_URL, "")],
        )
        .with_results(
            "software platform",
            vec![
                hit("Which scheduler do you use?", "https://www.reddit.com/r/Dentistry/comments/1", "We use..."),
                hit("Acme | Dental scheduling", "https://acme.io/", "We help dental practices book patients."),
                hit("Acme features", "https://acme.io/features", "Our scheduling features."),
                hit("Dental software", "https://en.wikipedia.org/wiki/Dental_software", ""),
            ],
        );
    let fetcher = MockPageFetcher::new()
        .with_page(
            LISTING_URL,
            "[Zocdoc](https://zocdoc.com)\n[Acme](https://acme.io)\n[Write a review](https://www.g2.com/review)",
        )
        .with_page("https://acme.io/", PRODUCT_PAGE)
        .with_page("https://zocdoc.com/", PRODUCT_PAGE);

    let competitors = search_competitors(
        &searcher,
        &fetcher,
        &ResearchConfig::default(),
        &CompetitorRequest::new("dental scheduling"),
    )
    .await
    .unwrap();

    let mut names: Vec<_> = competitors.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Acme", "Zocdoc"]);
    assert!(competitors
        .iter()
        .all(|c| !c.url.contains("reddit") && !c.url.contains("wikipedia")));
    assert!(competitors
        .iter()
        .all(|c| c.features.as_deref() == Some(&["Online booking for every location".to_string()][..])));
}

#[tokio::test]
async fn test_communities_survive_a_broken_forum_api() {
    let searcher = MockWebSearcher::new().with_results(
        "site:reddit.com/r",
        vec![
            hit("r/Dentistry", "https://www.reddit.com/r/Dentistry/", "85k members"),
            hit("r/Dentistry thread", "https://reddit.com/r/Dentistry/comments/9/", ""),
        ],
    );
    let stories = MockStorySearcher::new().failing("algolia unavailable");

    let communities = find_communities(
        &searcher,
        &stories,
        &ResearchConfig::default(),
        &CommunityRequest::new("dentists", vec!["practice management".to_string()]),
    )
    .await
    .unwrap();

    assert_eq!(communities.len(), 1);
    assert_eq!(communities[0].platform, Platform::Reddit);
    assert_eq!(communities[0].name, "r/Dentistry");
    assert!(!stories.queries().is_empty());
}

#[tokio::test]
async fn test_low_engagement_stories_are_dropped() {
    let stories = MockStorySearcher::new().with_stories(
        "dentists",
        vec![
            Story::new("1", "Ask HN: Software for dentists?").with_points(42),
            Story::new("2", "My dental app").with_points(2),
        ],
    );

    let communities = find_communities(
        &MockWebSearcher::new(),
        &stories,
        &ResearchConfig::default(),
        &CommunityRequest::new("dentists", vec![]),
    )
    .await
    .unwrap();

    assert_eq!(communities.len(), 1);
    assert_eq!(communities[0].url, "https://news.ycombinator.com/item?id=1");
}

#[test]
fn test_dollar_extraction_does_not_leak_between_calls() {
    assert_eq!(extract_dollar_figures("a $1 billion market"), vec![1e9]);
    assert_eq!(extract_dollar_figures("a $2 billion market"), vec![2e9]);
}

#[test]
fn test_outlier_filter_drops_the_wild_figure() {
    let kept = filter_outliers(&[3e9, 5e9, 8e9, 590e9]);
    assert!(!kept.contains(&590e9));
    assert!(kept.contains(&5e9));
}

#[test]
fn test_scope_classification() {
    assert_eq!(classify_scope("mobile car wash app market"), MarketScope::Narrow);
    assert_eq!(classify_scope("car wash services industry"), MarketScope::Broad);
    assert_eq!(classify_scope("the market is large"), MarketScope::Broad);
}

#[test]
fn test_directories_always_score_zero() {
    for url in [
        "https://reddit.com/r/saas",
        "https://g2.com/products/x",
        "https://www.g2.com/categories/crm",
        "https://en.wikipedia.org/wiki/CRM",
    ] {
        let scored = score_result(&hit("We offer the best pricing", url, "Our platform. Sign up."));
        assert_eq!(scored, 0, "{} should be blocked", url);
    }
}

#[test]
fn test_url_dedup_ignores_case_and_trailing_slash() {
    let urls = vec![
        "https://reddit.com/r/saas",
        "https://reddit.com/r/saas/",
        "https://Reddit.com/r/SaaS",
    ];
    let deduped = dedupe_by_url(urls, |u| *u);
    assert_eq!(deduped, vec!["https://reddit.com/r/saas"]);
}

#[test]
fn test_free_and_pro_tiers() {
    let pricing =
        extract_structured_pricing("## Free\n$0/mo\n\n## Pro\n$29/mo\n- Unlimited projects");
    let names: Vec<_> = pricing.tiers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Free", "Pro"]);
    assert!(pricing.has_free_tier);
    assert!(!pricing.has_enterprise);
    assert_eq!(pricing.currency.as_deref(), Some("USD"));
}

#[test]
fn test_truncation_marker() {
    let blob = "x".repeat(2000);
    let out = truncate_markdown(&blob, 1000);
    assert!(out.starts_with(&"x".repeat(1000)));
    assert!(out.ends_with("[... content truncated]"));
}
