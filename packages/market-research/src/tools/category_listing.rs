//! Competitor names mined from a curated directory category page.

use tracing::{debug, info};

use crate::error::Result;
use crate::extract::parse_listing_links;
use crate::pipeline::domain::{hostname, same_site};
use crate::pipeline::queries::{category_listing_query, DIRECTORY_DOMAIN};
use crate::traits::fetcher::PageFetcher;
use crate::traits::searcher::WebSearcher;
use crate::types::search::SearchHit;

/// Provider tag on hits produced here.
pub const LISTING_SOURCE: &str = "category-listing";

/// Find the directory's category page for `industry`, fetch it, and turn its
/// outbound product links into search hits.
///
/// A missing category page is not an error; it yields no hits.
pub async fn mine_category_listing(
    searcher: &dyn WebSearcher,
    fetcher: &dyn PageFetcher,
    industry: &str,
    limit: usize,
) -> Result<Vec<SearchHit>> {
    let query = category_listing_query(industry);
    let hits = searcher.search_with_limit(&query, limit).await?;

    let Some(listing) = hits.iter().find(|hit| is_category_page(&hit.url)) else {
        debug!(query = %query, "No category listing page found");
        return Ok(Vec::new());
    };

    let page = fetcher.fetch(&listing.url).await?;
    let links = parse_listing_links(&page.markdown, DIRECTORY_DOMAIN);

    info!(
        listing = %listing.url,
        links = links.len(),
        "Mined category listing"
    );

    let snippet = format!("Listed in {} category \"{}\"", DIRECTORY_DOMAIN, listing.title);
    Ok(links
        .into_iter()
        .map(|link| SearchHit::new(link.name, link.url, snippet.clone()).with_source(LISTING_SOURCE))
        .collect())
}

fn is_category_page(url: &str) -> bool {
    url.contains("/categories/")
        && hostname(url).is_some_and(|host| same_site(&host, DIRECTORY_DOMAIN))
}
