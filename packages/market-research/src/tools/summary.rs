//! Report summary: one takeaway per section with data, plus the names of
//! sections that produced nothing.

use std::collections::BTreeSet;

use crate::types::community::Community;
use crate::types::competitor::Competitor;
use crate::types::market::MarketSizeEstimate;
use crate::types::pricing::PricingPage;
use crate::types::report::{
    ReportSection, ReportSummary, SECTION_COMMUNITIES, SECTION_COMPETITORS, SECTION_MARKET_SIZE,
    SECTION_PRICING,
};

/// Competitors named in the competitor takeaway.
const NAMED_COMPETITORS: usize = 3;

pub fn summarize(
    market_size: &ReportSection<MarketSizeEstimate>,
    competitors: &ReportSection<Vec<Competitor>>,
    communities: &ReportSection<Vec<Community>>,
    pricing: &ReportSection<Vec<PricingPage>>,
) -> ReportSummary {
    let mut key_takeaways = Vec::new();
    let mut failed_sections = Vec::new();

    match &market_size.data {
        Some(estimate) => key_takeaways.push(market_takeaway(estimate)),
        None => failed_sections.push(SECTION_MARKET_SIZE.to_string()),
    }
    match &competitors.data {
        Some(found) => key_takeaways.push(competitor_takeaway(found)),
        None => failed_sections.push(SECTION_COMPETITORS.to_string()),
    }
    match &communities.data {
        Some(found) => key_takeaways.push(community_takeaway(found)),
        None => failed_sections.push(SECTION_COMMUNITIES.to_string()),
    }
    match &pricing.data {
        Some(pages) => {
            if let Some(takeaway) = pricing_takeaway(pages) {
                key_takeaways.push(takeaway);
            }
        }
        None => failed_sections.push(SECTION_PRICING.to_string()),
    }

    ReportSummary {
        key_takeaways,
        failed_sections,
    }
}

fn market_takeaway(estimate: &MarketSizeEstimate) -> String {
    if estimate.is_unknown() {
        return match &estimate.note {
            Some(note) => format!("Market size could not be estimated: {}", note),
            None => "Market size could not be estimated".to_string(),
        };
    }

    let mut sentence = format!(
        "Market size is estimated at {} to {} ({} confidence)",
        estimate.low, estimate.high, estimate.confidence
    );
    if let Some(growth) = &estimate.growth_rate {
        sentence.push_str(&format!(", growing at {} annually", growth));
    }
    sentence.push('.');
    sentence
}

fn competitor_takeaway(competitors: &[Competitor]) -> String {
    if competitors.is_empty() {
        return "No direct competitors were found.".to_string();
    }

    let names = competitors
        .iter()
        .take(NAMED_COMPETITORS)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Found {} {}, led by {}.",
        competitors.len(),
        plural(competitors.len(), "competitor", "competitors"),
        names
    )
}

fn community_takeaway(communities: &[Community]) -> String {
    if communities.is_empty() {
        return "No active communities were found for this audience.".to_string();
    }

    let platforms: BTreeSet<String> = communities.iter().map(|c| c.platform.to_string()).collect();
    format!(
        "Found {} {} across {}.",
        communities.len(),
        plural(communities.len(), "community", "communities"),
        platforms.into_iter().collect::<Vec<_>>().join(", ")
    )
}

/// `None` when nothing was priced.
fn pricing_takeaway(pages: &[PricingPage]) -> Option<String> {
    let structured: Vec<_> = pages
        .iter()
        .filter_map(|page| page.structured_pricing.as_ref())
        .collect();
    if structured.is_empty() {
        return None;
    }

    let tiers: usize = structured.iter().map(|s| s.tiers.len()).sum();
    let free = structured.iter().filter(|s| s.has_free_tier).count();
    let enterprise = structured.iter().filter(|s| s.has_enterprise).count();

    let mut sentence = format!(
        "Pricing reviewed for {} {} ({} tiers total)",
        structured.len(),
        plural(structured.len(), "competitor", "competitors"),
        tiers
    );
    if free > 0 {
        sentence.push_str(&format!("; {} offer a free tier", free));
    }
    if enterprise > 0 {
        sentence.push_str(&format!("; {} sell an enterprise plan", enterprise));
    }
    sentence.push('.');
    Some(sentence)
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::community::Platform;
    use crate::types::pricing::StructuredPricing;

    fn estimate() -> MarketSizeEstimate {
        let mut estimate = MarketSizeEstimate::unknown("placeholder");
        estimate.low = "$4.0B".to_string();
        estimate.high = "$5.0B".to_string();
        estimate.note = None;
        estimate.growth_rate = Some("8.5%".to_string());
        estimate
    }

    #[test]
    fn test_all_sections_succeed() {
        let competitors = vec![
            Competitor::new("Alpha", "https://alpha.io/", ""),
            Competitor::new("Beta", "https://beta.io/", ""),
            Competitor::new("Gamma", "https://gamma.io/", ""),
            Competitor::new("Delta", "https://delta.io/", ""),
        ];
        let communities = vec![
            Community::new(Platform::Reddit, "r/saas", "https://www.reddit.com/r/saas"),
            Community::new(Platform::Discord, "Founders", "https://discord.gg/f"),
            Community::new(Platform::Reddit, "r/startups", "https://www.reddit.com/r/startups"),
        ];
        let mut page = PricingPage::failed("https://alpha.io/pricing", None, "x");
        page.structured_pricing = Some(StructuredPricing {
            has_free_tier: true,
            ..Default::default()
        });

        let summary = summarize(
            &ReportSection::ok(estimate()),
            &ReportSection::ok(competitors),
            &ReportSection::ok(communities),
            &ReportSection::ok(vec![page]),
        );

        assert!(summary.failed_sections.is_empty());
        assert_eq!(
            summary.key_takeaways,
            vec![
                "Market size is estimated at $4.0B to $5.0B (low confidence), growing at 8.5% annually.",
                "Found 4 competitors, led by Alpha, Beta, Gamma.",
                "Found 3 communities across Discord, Reddit.",
                "Pricing reviewed for 1 competitor (0 tiers total); 1 offer a free tier.",
            ]
        );
    }

    #[test]
    fn test_failed_sections_listed_in_order() {
        let summary = summarize(
            &ReportSection::failed("down"),
            &ReportSection::failed("down"),
            &ReportSection::ok(vec![]),
            &ReportSection::ok(vec![]),
        );
        assert_eq!(summary.failed_sections, vec!["market_size", "competitors"]);
        assert_eq!(
            summary.key_takeaways,
            vec!["No active communities were found for this audience."]
        );
    }

    #[test]
    fn test_partial_section_is_not_failed() {
        let summary = summarize(
            &ReportSection::ok(MarketSizeEstimate::unknown("No data")),
            &ReportSection::ok(vec![]),
            &ReportSection::ok(vec![]),
            &ReportSection::partial(vec![], "2 failed"),
        );
        assert!(summary.failed_sections.is_empty());
        assert_eq!(summary.key_takeaways[0], "Market size could not be estimated: No data");
    }
}
