//! Scope-aware market size estimation.
//!
//! Two searches per industry (narrow segment terms and broad industry
//! terms), dollar figures tagged by the scope of the sentence they came
//! from, outliers filtered per scope group. Absence of data is a normal
//! outcome here and comes back as an "Unknown" estimate, not an error.

use tracing::{debug, info, warn};

use crate::error::{Result, SearchError};
use crate::extract::{
    classify_scope_with, extract_dollar_figures, extract_growth_rate, format_usd, split_sentences,
};
use crate::pipeline::dedup::dedupe_by_url;
use crate::pipeline::outliers::{calculate_confidence, filter_outliers, spread};
use crate::pipeline::queries::{broad_market_query, narrow_market_query};
use crate::pipeline::settle::settle_all;
use crate::traits::searcher::WebSearcher;
use crate::types::config::ResearchConfig;
use crate::types::market::{
    MarketScope, MarketSizeEstimate, ScopedFigure, SourceRef, SubRange, MAX_SOURCES,
};
use crate::types::requests::MarketSizeRequest;
use crate::types::search::SearchHit;

/// Broad maximum above this multiple of the narrow maximum flags a mismatch.
const MISMATCH_FACTOR: f64 = 2.0;

/// Figures found in one hit.
struct HitFigures {
    hit: SearchHit,
    figures: Vec<ScopedFigure>,
}

pub async fn estimate_market_size(
    searcher: &dyn WebSearcher,
    config: &ResearchConfig,
    request: &MarketSizeRequest,
) -> Result<MarketSizeEstimate> {
    request.validate()?;
    let industry = request.industry.trim();
    let queries = [
        narrow_market_query(industry, request.geography),
        broad_market_query(industry, request.geography),
    ];

    info!(industry = %industry, geography = ?request.geography, "Estimating market size");

    let settled = settle_all(
        queries
            .iter()
            .map(|q| searcher.search_with_limit(q, config.results_per_query)),
    )
    .await;
    let all_failed = settled.all_rejected();
    let (batches, errors) = settled.into_parts();

    for err in &errors {
        warn!(error = %err, "Market size query failed");
    }

    let hits: Vec<SearchHit> = batches.into_iter().flatten().collect();
    let hits = dedupe_by_url(hits, |h| h.url.as_str());

    if hits.is_empty() {
        let note = match errors.first() {
            Some(SearchError::NotConfigured) => "No search provider configured".to_string(),
            Some(err) if all_failed => format!("Market size search failed: {}", err),
            _ => format!("No market size data found for '{}'", industry),
        };
        info!(industry = %industry, note = %note, "Market size unknown");
        return Ok(MarketSizeEstimate::unknown(note));
    }

    Ok(assemble_estimate(hits, config.ambiguous_scope))
}

/// Build an estimate from deduplicated hits.
pub fn assemble_estimate(hits: Vec<SearchHit>, ambiguous_scope: MarketScope) -> MarketSizeEstimate {
    let tagged: Vec<HitFigures> = hits
        .into_iter()
        .map(|hit| {
            let figures = scoped_figures(&hit.snippet, ambiguous_scope);
            HitFigures { hit, figures }
        })
        .collect();

    let growth_rate = tagged
        .iter()
        .find_map(|t| extract_growth_rate(&t.hit.snippet));
    let figure_sources = tagged.iter().filter(|t| !t.figures.is_empty()).count();
    let sources = select_sources(&tagged);

    let (narrow, broad): (Vec<f64>, Vec<f64>) = {
        let all = tagged.iter().flat_map(|t| t.figures.iter());
        let mut narrow = Vec::new();
        let mut broad = Vec::new();
        for figure in all {
            match figure.scope {
                MarketScope::Narrow => narrow.push(figure.value),
                MarketScope::Broad => broad.push(figure.value),
            }
        }
        (narrow, broad)
    };

    if narrow.is_empty() && broad.is_empty() {
        let mut estimate = MarketSizeEstimate::unknown("No dollar figures found in search results");
        estimate.sources = sources;
        estimate.growth_rate = growth_rate;
        return estimate;
    }

    let narrow = filter_outliers(&narrow);
    let broad = filter_outliers(&broad);

    let primary = if narrow.len() >= 2 {
        narrow.clone()
    } else if broad.len() >= 2 {
        broad.clone()
    } else {
        let union: Vec<f64> = narrow.iter().chain(broad.iter()).copied().collect();
        filter_outliers(&union)
    };

    let (low, high) = bounds(&primary);
    let mismatch = match (max_of(&narrow), max_of(&broad)) {
        (Some(narrow_max), Some(broad_max)) => broad_max > narrow_max * MISMATCH_FACTOR,
        _ => false,
    };

    let confidence = calculate_confidence(figure_sources, primary.len(), spread(low, high), mismatch);
    debug!(
        narrow = narrow.len(),
        broad = broad.len(),
        primary = primary.len(),
        mismatch,
        confidence = %confidence,
        "Market figures assembled"
    );

    let mut estimate = MarketSizeEstimate {
        low: format_usd(low),
        high: format_usd(high),
        narrow_estimate: None,
        broad_estimate: None,
        growth_rate,
        confidence,
        sources,
        note: None,
    };

    if mismatch {
        let (narrow_low, narrow_high) = bounds(&narrow);
        let (broad_low, broad_high) = bounds(&broad);
        estimate.narrow_estimate = Some(SubRange {
            low: format_usd(narrow_low),
            high: format_usd(narrow_high),
            description: "Digital, platform or app segment".to_string(),
        });
        estimate.broad_estimate = Some(SubRange {
            low: format_usd(broad_low),
            high: format_usd(broad_high),
            description: "Entire industry or sector".to_string(),
        });
        estimate.note = Some(format!(
            "Sources describe two different markets: the narrow segment tops out at {} while the whole industry reaches {}. The headline range uses the {} figures.",
            format_usd(narrow_high),
            format_usd(broad_high),
            if narrow.len() >= 2 { "narrow" } else { "broad" },
        ));
    }

    estimate
}

/// Dollar figures per sentence, each tagged with that sentence's scope.
fn scoped_figures(text: &str, ambiguous_scope: MarketScope) -> Vec<ScopedFigure> {
    split_sentences(text)
        .into_iter()
        .flat_map(|sentence| {
            let scope = classify_scope_with(sentence, ambiguous_scope);
            extract_dollar_figures(sentence)
                .into_iter()
                .map(move |value| ScopedFigure::new(value, scope))
        })
        .collect()
}

/// Up to five sources, hits that yielded figures first.
fn select_sources(tagged: &[HitFigures]) -> Vec<SourceRef> {
    let with_figures = tagged.iter().filter(|t| !t.figures.is_empty());
    let without = tagged.iter().filter(|t| t.figures.is_empty());

    with_figures
        .chain(without)
        .take(MAX_SOURCES)
        .map(|t| SourceRef {
            title: t.hit.title.clone(),
            url: t.hit.url.clone(),
            snippet: t.hit.snippet.clone(),
        })
        .collect()
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() {
        (0.0, 0.0)
    } else {
        (low, high)
    }
}

fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockWebSearcher;
    use crate::types::market::{Confidence, Geography};

    fn hit(url: &str, snippet: &str) -> SearchHit {
        SearchHit::new(format!("Report {}", url), url, snippet)
    }

    #[tokio::test]
    async fn test_no_provider_is_soft_unknown() {
        let searcher = crate::providers::FallbackSearcher::new(vec![]);
        let estimate = estimate_market_size(
            &searcher,
            &ResearchConfig::default(),
            &MarketSizeRequest::new("pet grooming"),
        )
        .await
        .unwrap();

        assert!(estimate.is_unknown());
        assert_eq!(estimate.confidence, Confidence::Low);
        assert_eq!(estimate.note.as_deref(), Some("No search provider configured"));
    }

    #[tokio::test]
    async fn test_failed_searches_are_soft() {
        let searcher = MockWebSearcher::new().failing("timeout");
        let estimate = estimate_market_size(
            &searcher,
            &ResearchConfig::default(),
            &MarketSizeRequest::new("pet grooming"),
        )
        .await
        .unwrap();

        assert!(estimate.is_unknown());
        assert!(estimate.note.unwrap().starts_with("Market size search failed"));
    }

    #[tokio::test]
    async fn test_consistent_figures_give_high_confidence() {
        let searcher = MockWebSearcher::new().with_results(
            "TAM billion",
            vec![
                hit("https://a.com/r", "The pet grooming software market was $4.0 billion in 2023."),
                hit("https://b.com/r", "Analysts value the pet grooming app market at $5 billion, growing at a CAGR of 8.5%."),
                hit("https://c.com/r", "The online pet grooming platform market reached $4.5 billion."),
            ],
        );

        let estimate = estimate_market_size(
            &searcher,
            &ResearchConfig::default(),
            &MarketSizeRequest::new("pet grooming").with_geography(Geography::Us),
        )
        .await
        .unwrap();

        assert_eq!(estimate.low, "$4.0B");
        assert_eq!(estimate.high, "$5.0B");
        assert_eq!(estimate.confidence, Confidence::High);
        assert_eq!(estimate.growth_rate.as_deref(), Some("8.5%"));
        assert!(estimate.note.is_none());
        assert_eq!(estimate.sources.len(), 3);
        assert!(searcher.queries().iter().any(|q| q.contains("United States")));
    }

    #[test]
    fn test_scope_mismatch_reports_both_ranges() {
        let hits = vec![
            hit("https://a.com", "The mobile car wash app market is worth $1.2 billion."),
            hit("https://b.com", "On-demand car wash platforms generated $1.5 billion."),
            hit("https://c.com", "The car wash industry generates $40 billion in total revenue."),
            hit("https://d.com", "The car wash services sector is a $38 billion industry."),
        ];

        let estimate = assemble_estimate(hits, MarketScope::Broad);

        assert_eq!(estimate.low, "$1.2B");
        assert_eq!(estimate.high, "$1.5B");
        assert_eq!(estimate.confidence, Confidence::Medium);
        let narrow = estimate.narrow_estimate.unwrap();
        let broad = estimate.broad_estimate.unwrap();
        assert_eq!(narrow.high, "$1.5B");
        assert_eq!(broad.low, "$38.0B");
        assert!(estimate.note.unwrap().contains("narrow"));
    }

    #[test]
    fn test_hits_without_figures() {
        let hits = vec![hit("https://a.com", "Pet grooming is growing fast.")];
        let estimate = assemble_estimate(hits, MarketScope::Broad);
        assert!(estimate.is_unknown());
        assert_eq!(estimate.sources.len(), 1);
    }

    #[test]
    fn test_sources_capped_and_figure_hits_first() {
        let mut hits: Vec<SearchHit> = (0..6)
            .map(|i| hit(&format!("https://n{}.com", i), "No numbers here."))
            .collect();
        hits.push(hit("https://fig.com", "A $2 billion market."));

        let estimate = assemble_estimate(hits, MarketScope::Broad);
        assert_eq!(estimate.sources.len(), MAX_SOURCES);
        assert_eq!(estimate.sources[0].url, "https://fig.com");
    }
}
