//! Competitor discovery.
//!
//! Flow:
//! 1. Three query variants plus category-listing mining, concurrently
//! 2. Merge by domain, score with source bonuses, threshold, sort
//! 3. Rewrite noisy URLs to domain roots and re-dedupe
//! 4. Fetch the top `max_results + headroom`, keep confirmed product pages
//!    (a failed fetch keeps the candidate on snippet data)
//! 5. Backfill from the remaining candidates when short

use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::category_listing::mine_category_listing;
use crate::error::{ResearchError, Result, SearchError};
use crate::extract::{extract_features, extract_tagline};
use crate::pipeline::dedup::{canonical_domain, dedupe_by_domain};
use crate::pipeline::domain::{domain_name_sans_tld, hostname};
use crate::pipeline::queries::{competitor_base, competitor_queries};
use crate::pipeline::scoring::{is_product_page, normalize_product_url, score_result};
use crate::pipeline::settle::settle_all;
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::traits::searcher::WebSearcher;
use crate::types::competitor::Competitor;
use crate::types::config::ResearchConfig;
use crate::types::requests::CompetitorRequest;
use crate::types::search::{ScoredCandidate, SearchHit, SourceBonus};

/// Title separators; the first segment is usually the product name.
const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", ": ", " · "];
const MAX_NAME_CHARS: usize = 60;

/// Where a merged hit was seen.
struct MergedHit {
    hit: SearchHit,
    from_web: bool,
    from_listing: bool,
}

pub async fn search_competitors(
    searcher: &dyn WebSearcher,
    fetcher: &dyn PageFetcher,
    config: &ResearchConfig,
    request: &CompetitorRequest,
) -> Result<Vec<Competitor>> {
    request.validate()?;
    let limit = request.limit();
    let base = competitor_base(&request.industry, request.product_type());
    let queries = competitor_queries(&request.industry, request.product_type());

    info!(base = %base, max_results = limit, "Searching competitors");

    let web = settle_all(
        queries
            .iter()
            .map(|q| searcher.search_with_limit(q, config.results_per_query)),
    );
    let listing = mine_category_listing(
        searcher,
        fetcher,
        &request.industry,
        config.results_per_query,
    );
    let (web, listing) = tokio::join!(web, listing);

    let (batches, errors) = web.into_parts();
    let web_hits: Vec<SearchHit> = batches.into_iter().flatten().collect();
    let listing_hits = listing.unwrap_or_else(|e| {
        warn!(error = %e, "Category listing mining failed");
        Vec::new()
    });

    for err in &errors {
        warn!(error = %err, "Competitor query failed");
    }

    if web_hits.is_empty() && listing_hits.is_empty() {
        return Err(no_hits_error(&base, queries.len(), errors));
    }

    let candidates = rank_candidates(web_hits, listing_hits, config.score_threshold);
    debug!(candidates = candidates.len(), "Candidates above threshold");

    if candidates.is_empty() {
        info!(base = %base, "All competitor hits were filtered as noise");
        return Ok(Vec::new());
    }

    let competitors = confirm_candidates(fetcher, candidates, limit, limit + config.fetch_headroom).await;
    info!(base = %base, found = competitors.len(), "Competitor search complete");
    Ok(competitors)
}

fn no_hits_error(base: &str, batches: usize, errors: Vec<SearchError>) -> ResearchError {
    if errors.len() < batches {
        return ResearchError::NoResults(format!("no competitor search results for '{}'", base));
    }
    match errors.into_iter().next() {
        Some(SearchError::NotConfigured) => {
            ResearchError::Config("no search provider configured".to_string())
        }
        Some(first) => ResearchError::AllBatchesFailed {
            batches,
            first_error: first.to_string(),
        },
        None => ResearchError::NoResults(format!("no competitor search results for '{}'", base)),
    }
}

/// Merge web and listing hits by domain, score, threshold and sort.
fn rank_candidates(
    web_hits: Vec<SearchHit>,
    listing_hits: Vec<SearchHit>,
    threshold: i32,
) -> Vec<ScoredCandidate> {
    let mut merged: IndexMap<String, MergedHit> = IndexMap::new();

    for (hit, from_listing) in web_hits
        .into_iter()
        .map(|h| (h, false))
        .chain(listing_hits.into_iter().map(|h| (h, true)))
    {
        let domain = canonical_domain(&hit.url);
        let entry = merged.entry(domain).or_insert_with(|| MergedHit {
            hit,
            from_web: false,
            from_listing: false,
        });
        if from_listing {
            entry.from_listing = true;
        } else {
            entry.from_web = true;
        }
    }

    let mut candidates: Vec<ScoredCandidate> = merged
        .into_values()
        .map(|merged| {
            let score = score_result(&merged.hit);
            let mut candidate = ScoredCandidate::new(merged.hit, score);
            if merged.from_listing {
                candidate = candidate.with_bonus(SourceBonus::CategoryListing);
            }
            if merged.from_listing && merged.from_web {
                candidate = candidate.with_bonus(SourceBonus::MultiSource);
            }
            candidate
        })
        .filter(|c| c.score >= threshold)
        .collect();

    // Stable: equal scores keep provider order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    for candidate in &mut candidates {
        candidate.hit.url = normalize_product_url(&candidate.hit.url);
    }
    dedupe_by_domain(candidates, |c| c.hit.url.as_str())
}

/// Fetch and confirm candidates until `limit` competitors are found or the
/// candidates run out. The first round fetches `first_round` candidates.
async fn confirm_candidates(
    fetcher: &dyn PageFetcher,
    candidates: Vec<ScoredCandidate>,
    limit: usize,
    first_round: usize,
) -> Vec<Competitor> {
    let mut remaining: VecDeque<ScoredCandidate> = candidates.into();
    let mut competitors = Vec::new();
    let mut round_size = first_round;

    while competitors.len() < limit && !remaining.is_empty() {
        let take = round_size.min(remaining.len());
        let round: Vec<ScoredCandidate> = remaining.drain(..take).collect();

        let fetched = settle_all(round.iter().map(|c| fetcher.fetch(&c.hit.url))).await;

        for (candidate, outcome) in round.into_iter().zip(fetched.into_outcomes()) {
            match outcome {
                Ok(page) if is_product_page(&page.markdown) => {
                    competitors.push(competitor_from_page(&candidate.hit, &page));
                }
                Ok(_) => {
                    debug!(url = %candidate.hit.url, score = candidate.score, "Rejected: not a product page");
                }
                Err(e) => {
                    warn!(url = %candidate.hit.url, error = %e, "Fetch failed, keeping snippet data");
                    competitors.push(competitor_from_hit(&candidate.hit));
                }
            }
        }

        // Backfill rounds fetch only what is still missing
        round_size = limit.saturating_sub(competitors.len()).max(1);
    }

    competitors.truncate(limit);
    competitors
}

fn competitor_from_hit(hit: &SearchHit) -> Competitor {
    Competitor::new(competitor_name(hit), hit.url.clone(), hit.snippet.trim())
}

fn competitor_from_page(hit: &SearchHit, page: &FetchedPage) -> Competitor {
    let tagline = extract_tagline(&page.markdown);
    let description = if hit.snippet.trim().is_empty() {
        tagline.clone().unwrap_or_default()
    } else {
        hit.snippet.trim().to_string()
    };

    Competitor::new(competitor_name(hit), hit.url.clone(), description)
        .with_tagline(tagline)
        .with_features(extract_features(&page.markdown))
}

/// First segment of the title, or the domain name when the title is unusable.
fn competitor_name(hit: &SearchHit) -> String {
    let title = hit.title.trim();
    let first = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.find(sep))
        .min()
        .map(|idx| &title[..idx])
        .unwrap_or(title)
        .trim();

    if !first.is_empty() && first.chars().count() <= MAX_NAME_CHARS {
        return first.to_string();
    }

    let name = hostname(&hit.url)
        .map(|host| domain_name_sans_tld(&host))
        .unwrap_or_default();
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => hit.url.clone(),
    }
}
