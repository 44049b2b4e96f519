//! Product links from category-listing (directory) pages.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::pipeline::domain::{hostname, same_site};

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap());

/// Domains that show up on every listing page but are never products.
const NON_PRODUCT_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "github.com",
    "apple.com",
    "google.com",
    "cloudfront.net",
    "amazonaws.com",
    "gstatic.com",
    "googleusercontent.com",
    "cdn.jsdelivr.net",
    "cloudflare.com",
];

const ASSET_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".css", ".js"];

/// Anchor texts that are navigation, not product names.
const GENERIC_NAMES: &[&str] = &[
    "visit website",
    "website",
    "learn more",
    "read more",
    "read reviews",
    "see more",
    "view profile",
    "compare",
    "pricing",
    "free trial",
    "try for free",
    "get started",
    "home",
    "log in",
    "login",
    "sign up",
    "here",
    "click here",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLink {
    pub name: String,
    pub url: String,
}

/// Extract outbound product links from a listing page.
///
/// Links back into the directory itself, social and CDN domains, asset
/// files and generic anchor text are skipped. One link per domain.
pub fn parse_listing_links(markdown: &str, directory_domain: &str) -> Vec<ListingLink> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for cap in MARKDOWN_LINK_RE.captures_iter(markdown) {
        let (Some(whole), Some(text), Some(url)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            continue;
        };
        let name = text.as_str().trim();
        let url = url.as_str();

        // Image embed: ![alt](src)
        if markdown[..whole.start()].ends_with('!') || name.is_empty() {
            continue;
        }
        if GENERIC_NAMES.contains(&name.to_lowercase().as_str()) {
            continue;
        }

        let Some(host) = hostname(url) else {
            continue;
        };
        if same_site(&host, directory_domain)
            || NON_PRODUCT_DOMAINS.iter().any(|d| same_site(&host, d))
        {
            continue;
        }
        let lower_url = url.to_lowercase();
        if ASSET_EXTENSIONS.iter().any(|ext| lower_url.ends_with(ext)) {
            continue;
        }

        if seen.insert(host) {
            links.push(ListingLink {
                name: name.to_string(),
                url: url.to_string(),
            });
        }
    }

    links
}
