//! Full research report.
//!
//! Market size, competitors and communities run concurrently and each may
//! fail on its own. Pricing waits for competitors and covers the top few.
//! No sub-operation error escapes: every outcome lands in a section.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::pipeline::settle::settle_all;
use crate::pipeline::topics::derive_topics;
use crate::tools::summary::summarize;
use crate::traits::research::ResearchTools;
use crate::types::competitor::Competitor;
use crate::types::config::ResearchConfig;
use crate::types::pricing::PricingPage;
use crate::types::report::{
    FullReport, ReportSection, SECTION_COMMUNITIES, SECTION_COMPETITORS, SECTION_MARKET_SIZE,
};
use crate::types::requests::{PricingRequest, ReportRequest};

pub async fn full_research_report<T: ResearchTools + ?Sized>(
    tools: &T,
    config: &ResearchConfig,
    request: &ReportRequest,
) -> Result<FullReport> {
    request.validate()?;
    let idea = request.business_idea.trim();
    let topics = derive_topics(idea);

    info!(idea = %idea, topics = ?topics, "Building research report");

    let market_request = request.market_request();
    let competitor_request = request.competitor_request();
    let community_request = request.community_request(topics);

    let (market_size, (competitors, pricing), communities) = tokio::join!(
        tools.estimate_market_size(&market_request),
        async {
            let competitors = tools.search_competitors(&competitor_request).await;
            let pricing = match &competitors {
                Ok(found) => price_competitors(tools, found, config.pricing_candidates).await,
                // Nothing to price
                Err(_) => ReportSection::ok(Vec::new()),
            };
            (competitors, pricing)
        },
        tools.find_communities(&community_request),
    );

    let market_size = section(SECTION_MARKET_SIZE, market_size);
    let competitors = section(SECTION_COMPETITORS, competitors);
    let communities = section(SECTION_COMMUNITIES, communities);
    let summary = summarize(&market_size, &competitors, &communities, &pricing);

    info!(
        idea = %idea,
        failed = ?summary.failed_sections,
        "Research report complete"
    );

    Ok(FullReport {
        business_idea: idea.to_string(),
        generated_at: Utc::now(),
        market_size,
        competitors,
        communities,
        pricing,
        summary,
    })
}

fn section<T>(name: &str, result: Result<T>) -> ReportSection<T> {
    if let Err(e) = &result {
        warn!(section = name, error = %e, "Report section failed");
    }
    ReportSection::from(result)
}

/// Price the top `limit` competitors concurrently.
///
/// A page that could not be read counts as a failure. Some failures give a
/// partial section; all failures give a failed one.
async fn price_competitors<T: ResearchTools + ?Sized>(
    tools: &T,
    competitors: &[Competitor],
    limit: usize,
) -> ReportSection<Vec<PricingPage>> {
    let requests: Vec<PricingRequest> = competitors
        .iter()
        .take(limit)
        .map(|c| PricingRequest::new(c.url.clone()).with_competitor_name(c.name.clone()))
        .collect();
    if requests.is_empty() {
        return ReportSection::ok(Vec::new());
    }

    let settled = settle_all(requests.iter().map(|request| async move {
        let page = tools.extract_pricing(request).await;
        if page.is_fetched() {
            Ok(page)
        } else {
            let label = request.competitor_name.as_deref().unwrap_or(&request.url);
            Err(format!("{}: {}", label, page.extraction_hints))
        }
    }))
    .await;

    let attempted = settled.len();
    let (pages, errors) = settled.into_parts();

    if errors.is_empty() {
        ReportSection::ok(pages)
    } else if pages.is_empty() {
        warn!(attempted, "Pricing failed for every competitor");
        ReportSection::failed(format!(
            "Pricing extraction failed for all {} competitors: {}",
            attempted,
            errors.join("; ")
        ))
    } else {
        warn!(priced = pages.len(), failed = errors.len(), "Pricing partially failed");
        let message = format!(
            "Pricing extracted for {} {}; {} failed: {}",
            pages.len(),
            if pages.len() == 1 { "competitor" } else { "competitors" },
            errors.len(),
            errors.join("; ")
        );
        ReportSection::partial(pages, message)
    }
}
