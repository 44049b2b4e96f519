//! Search query construction for each tool.

use crate::types::market::Geography;

/// The category-listing directory mined for competitor names.
pub const DIRECTORY_DOMAIN: &str = "g2.com";

/// Maximum Reddit queries per community search.
pub const MAX_REDDIT_QUERIES: usize = 3;

/// Topics added to the Hacker News batch alongside the audience.
pub const MAX_HN_TOPICS: usize = 2;

/// `industry`, with `product_type` appended when present.
pub fn competitor_base(industry: &str, product_type: Option<&str>) -> String {
    match product_type.map(str::trim).filter(|p| !p.is_empty()) {
        Some(product) => format!("{} {}", industry.trim(), product),
        None => industry.trim().to_string(),
    }
}

/// The three competitor query variants. The last one quotes the base term
/// for exact-match bias.
pub fn competitor_queries(industry: &str, product_type: Option<&str>) -> [String; 3] {
    let base = competitor_base(industry, product_type);
    [
        format!("{} software platform", base),
        format!("{} competitors alternatives", base),
        format!("\"{}\" pricing signup", base),
    ]
}

/// Query for a curated category page on the directory.
pub fn category_listing_query(industry: &str) -> String {
    format!("site:{}/categories {}", DIRECTORY_DOMAIN, industry.trim())
}

fn with_geography(parts: &[&str], geography: Geography) -> String {
    let mut words: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if let Some(qualifier) = geography.qualifier() {
        words.push(qualifier);
    }
    words.join(" ")
}

/// Narrow (segment-level) market-size query.
pub fn narrow_market_query(industry: &str, geography: Geography) -> String {
    let mut query = with_geography(&[industry.trim(), "market size"], geography);
    query.push_str(" TAM billion");
    query
}

/// Broad (industry-level) market-size query.
pub fn broad_market_query(industry: &str, geography: Geography) -> String {
    let mut query = with_geography(&[industry.trim(), "industry market size"], geography);
    query.push_str(" total revenue");
    query
}

/// Hacker News queries: the audience plus up to two topics.
pub fn hacker_news_queries(audience: &str, topics: &[String]) -> Vec<String> {
    std::iter::once(audience.trim().to_string())
        .chain(cleaned(topics).take(MAX_HN_TOPICS))
        .filter(|q| !q.is_empty())
        .collect()
}

/// Reddit-scoped queries: the audience, then one per topic, three at most.
pub fn reddit_queries(audience: &str, topics: &[String]) -> Vec<String> {
    std::iter::once(audience.trim().to_string())
        .chain(cleaned(topics))
        .filter(|q| !q.is_empty())
        .take(MAX_REDDIT_QUERIES)
        .map(|q| format!("site:reddit.com/r {} subreddit", q))
        .collect()
}

pub fn discord_query(audience: &str, topics: &[String]) -> String {
    let topic = cleaned(topics).next().unwrap_or_default();
    let subject = [audience.trim(), topic.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} discord server (site:discord.gg OR site:discord.com/invite)", subject)
}

pub fn forum_query(audience: &str) -> String {
    format!("{} forum OR community OR slack OR groups", audience.trim())
}

fn cleaned(topics: &[String]) -> impl Iterator<Item = String> + '_ {
    topics
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
