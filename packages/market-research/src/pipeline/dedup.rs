//! Deduplication by canonical domain or canonical URL.
//!
//! Competitors dedupe by domain (one company, one homepage). Communities
//! and market-size sources dedupe by URL, since two subreddits on the same
//! host are different communities.

use std::collections::HashSet;

use super::domain::hostname;

/// Hostname with `www.` stripped; the raw string when it does not parse.
pub fn canonical_domain(url: &str) -> String {
    hostname(url).unwrap_or_else(|| url.trim().to_lowercase())
}

/// Lower-cased URL with one trailing slash removed.
pub fn canonical_url(url: &str) -> String {
    let lower = url.trim().to_lowercase();
    match lower.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Keep the first item per key, preserving order.
pub fn dedupe_by_key<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

pub fn dedupe_by_domain<T, F>(items: Vec<T>, url_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    dedupe_by_key(items, |item| canonical_domain(url_of(item)))
}

pub fn dedupe_by_url<T, F>(items: Vec<T>, url_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    dedupe_by_key(items, |item| canonical_url(url_of(item)))
}
