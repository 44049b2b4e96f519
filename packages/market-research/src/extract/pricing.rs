//! Structured pricing extraction from pricing-page markdown.
//!
//! Sections are delimited by markdown headings or bold-only lines. A section
//! is a tier when its heading uses tier vocabulary, or its body carries a
//! price or contact-sales language.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::competitor::MAX_FEATURES;
use crate::types::pricing::{BillingPeriod, PricingModel, PricingTier, StructuredPricing};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.+?)\s*#*\s*$").unwrap());
static BOLD_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\*\*|__)([^*_]+?)(?:\*\*|__)\s*:?\s*$").unwrap());

static TIER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:free|basic|starter|start|pro|professional|team|teams|business|enterprise|plus|premium|growth|scale|standard|personal|individual|hobby|essentials?|advanced|ultimate|unlimited|startup|agency|lite|developer|organization|creator|core)\b",
    )
    .unwrap()
});

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\$\s?(\d[\d,]*(?:\.\d{1,2})?)(?:\s*(?:/|per)\s*(?:(?:user|seat|member)\s*(?:/|per)\s*)?(?:mo(?:nth)?|yr|year|annum|user|seat|member)\b)?",
    )
    .unwrap()
});

static CONTACT_SALES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:contact\s+(?:us|sales)|talk\s+to\s+sales|custom\s+pricing|request\s+(?:a\s+)?(?:pricing|quote)|get\s+a\s+quote|let'?s\s+talk)\b")
        .unwrap()
});

static ANNUAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/\s*(?:yr|year|annum)\b|\bper\s+(?:year|annum)\b|\bbilled\s+(?:annually|yearly)\b").unwrap()
});
static MONTHLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/\s*mo(?:nth)?\b|\bper\s+month\b|\bmonthly\b|\bper\s+(?:user|seat)\b|/\s*(?:user|seat)\b")
        .unwrap()
});

static PER_USER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bper\s+(?:user|seat|member)s?\b|/\s*(?:user|seat|member)\b").unwrap()
});
static USAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:usage|metered|pay[\s-]as[\s-]you[\s-]go)\b").unwrap()
});
static SUBSCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:subscribe|subscription|membership)\b").unwrap());

static PLAN_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+plan$").unwrap());

/// Tier headings are short; longer headings are prose.
const MAX_TIER_HEADING_WORDS: usize = 4;

struct Section<'a> {
    heading: String,
    body: Vec<&'a str>,
}

/// Extract tiers and page-level pricing flags from markdown.
pub fn extract_structured_pricing(markdown: &str) -> StructuredPricing {
    let mut tiers: Vec<PricingTier> = split_sections(markdown)
        .iter()
        .filter_map(tier_from_section)
        .collect();

    if tiers.is_empty() {
        if let Some(price) = first_price(markdown) {
            let period = billing_period(None, Some(price.as_str()), "");
            tiers.push(
                PricingTier::new("Default")
                    .with_price(Some(price))
                    .with_billing_period(period),
            );
        }
    }

    let has_price = PRICE_RE.is_match(markdown);
    let has_free_tier = tiers.iter().any(|t| {
        t.billing_period == Some(BillingPeriod::Free)
            || t.price.as_deref().and_then(price_value) == Some(0.0)
    });
    let has_enterprise = tiers
        .iter()
        .any(|t| t.name.trim().eq_ignore_ascii_case("enterprise"));

    StructuredPricing {
        tiers,
        has_free_tier,
        has_enterprise,
        pricing_model: pricing_model(markdown, has_price),
        currency: has_price.then(|| "USD".to_string()),
    }
}

fn split_sections(markdown: &str) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = Vec::new();

    for line in markdown.lines() {
        match heading_text(line) {
            Some(heading) => sections.push(Section {
                heading,
                body: Vec::new(),
            }),
            None => {
                if let Some(current) = sections.last_mut() {
                    current.body.push(line);
                }
            }
        }
    }

    sections
}

fn heading_text(line: &str) -> Option<String> {
    let cap = HEADING_RE
        .captures(line)
        .or_else(|| BOLD_HEADING_RE.captures(line))?;
    let text = cap.get(1)?.as_str().replace("**", "").replace("__", "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn tier_from_section(section: &Section<'_>) -> Option<PricingTier> {
    let body = section.body.join("\n");
    let is_tier_heading = section.heading.split_whitespace().count() <= MAX_TIER_HEADING_WORDS
        && TIER_NAME_RE.is_match(&section.heading);
    let price = first_price(&body);
    let contact_sales = CONTACT_SALES_RE.is_match(&body);

    if !is_tier_heading && price.is_none() && !contact_sales {
        return None;
    }

    let name = PLAN_SUFFIX_RE.replace(&section.heading, "").trim().to_string();
    let period = billing_period(Some(name.as_str()), price.as_deref(), &body).or_else(|| {
        (price.is_none() && contact_sales).then_some(BillingPeriod::Custom)
    });

    Some(
        PricingTier::new(name)
            .with_price(price)
            .with_billing_period(period)
            .with_features(bullet_lines(&section.body)),
    )
}

fn first_price(text: &str) -> Option<String> {
    PRICE_RE
        .find(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Numeric value of a price token like `$1,299.00/yr`.
fn price_value(price: &str) -> Option<f64> {
    PRICE_RE
        .captures(price)?
        .get(1)?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()
}

fn billing_period(name: Option<&str>, price: Option<&str>, body: &str) -> Option<BillingPeriod> {
    let free_name = name.is_some_and(|n| n.to_lowercase().contains("free"));

    match price {
        Some(token) => {
            if free_name || price_value(token) == Some(0.0) {
                Some(BillingPeriod::Free)
            } else if ANNUAL_RE.is_match(token) {
                Some(BillingPeriod::Annual)
            } else if MONTHLY_RE.is_match(token) {
                Some(BillingPeriod::Monthly)
            } else if ANNUAL_RE.is_match(body) {
                Some(BillingPeriod::Annual)
            } else if MONTHLY_RE.is_match(body) {
                Some(BillingPeriod::Monthly)
            } else {
                None
            }
        }
        None if free_name => Some(BillingPeriod::Free),
        None => None,
    }
}

/// First few bullet-like lines, marker stripped.
fn bullet_lines(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let rest = ["- ", "* ", "+ ", "• ", "✓ ", "✔ "]
                .iter()
                .find_map(|marker| trimmed.strip_prefix(marker))?;
            let text = rest.trim().trim_start_matches("[x] ").trim_start_matches("[ ] ").trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .take(MAX_FEATURES)
        .collect()
}

fn pricing_model(markdown: &str, has_price: bool) -> Option<PricingModel> {
    if PER_USER_RE.is_match(markdown) {
        Some(PricingModel::PerUser)
    } else if USAGE_RE.is_match(markdown) {
        Some(PricingModel::UsageBased)
    } else if SUBSCRIPTION_RE.is_match(markdown) {
        Some(PricingModel::Subscription)
    } else if has_price {
        Some(PricingModel::FlatRate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_heading_tiers() {
        let pricing =
            extract_structured_pricing("## Free\n$0/mo\n\n## Pro\n$29/mo\n- Unlimited projects");

        assert_eq!(pricing.tiers.len(), 2);
        assert_eq!(pricing.tiers[0].name, "Free");
        assert_eq!(pricing.tiers[0].price.as_deref(), Some("$0/mo"));
        assert_eq!(pricing.tiers[0].billing_period, Some(BillingPeriod::Free));
        assert_eq!(pricing.tiers[1].name, "Pro");
        assert_eq!(pricing.tiers[1].price.as_deref(), Some("$29/mo"));
        assert_eq!(pricing.tiers[1].billing_period, Some(BillingPeriod::Monthly));
        assert_eq!(
            pricing.tiers[1].features,
            Some(vec!["Unlimited projects".to_string()])
        );
        assert!(pricing.has_free_tier);
        assert!(!pricing.has_enterprise);
        assert_eq!(pricing.currency.as_deref(), Some("USD"));
        assert_eq!(pricing.pricing_model, Some(PricingModel::FlatRate));
    }

    #[test]
    fn test_plan_suffix_and_enterprise_contact_sales() {
        let md = "# Pricing\nSimple plans for everyone.\n\n\
                  ### Team Plan\n$12 per user/month\n- SSO\n- Audit log\n\n\
                  ### Enterprise\nContact sales for a custom quote\n- Dedicated support";
        let pricing = extract_structured_pricing(md);

        let names: Vec<_> = pricing.tiers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Team", "Enterprise"]);
        assert_eq!(pricing.tiers[0].billing_period, Some(BillingPeriod::Monthly));
        assert_eq!(pricing.tiers[1].price, None);
        assert_eq!(pricing.tiers[1].billing_period, Some(BillingPeriod::Custom));
        assert!(pricing.has_enterprise);
        assert!(!pricing.has_free_tier);
        assert_eq!(pricing.pricing_model, Some(PricingModel::PerUser));
    }

    #[test]
    fn test_bold_headings_and_annual_billing() {
        let md = "**Starter**\n$99/yr\n* Five seats\n\n**Scale**\n$499/year, billed annually";
        let pricing = extract_structured_pricing(md);

        assert_eq!(pricing.tiers.len(), 2);
        assert_eq!(pricing.tiers[0].name, "Starter");
        assert_eq!(pricing.tiers[0].billing_period, Some(BillingPeriod::Annual));
        assert_eq!(pricing.tiers[1].billing_period, Some(BillingPeriod::Annual));
    }

    #[test]
    fn test_features_capped_at_five() {
        let md = "## Business\n$49/mo\n- a1 feature\n- a2 feature\n- a3 feature\n- a4 feature\n- a5 feature\n- a6 feature";
        let pricing = extract_structured_pricing(md);
        assert_eq!(pricing.tiers[0].features.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn test_default_tier_fallback() {
        let md = "Everything you need.\nOnly $15/month, cancel anytime.";
        let pricing = extract_structured_pricing(md);

        assert_eq!(pricing.tiers.len(), 1);
        assert_eq!(pricing.tiers[0].name, "Default");
        assert_eq!(pricing.tiers[0].price.as_deref(), Some("$15/month"));
        assert_eq!(pricing.tiers[0].billing_period, Some(BillingPeriod::Monthly));
    }

    #[test]
    fn test_no_pricing_at_all() {
        let pricing = extract_structured_pricing("## About us\nWe love our customers.");
        assert!(pricing.tiers.is_empty());
        assert!(!pricing.has_free_tier);
        assert_eq!(pricing.pricing_model, None);
        assert_eq!(pricing.currency, None);
    }

    #[test]
    fn test_prose_heading_is_not_a_tier() {
        let md = "## Why teams switch to us from other tools\nBecause it's fast.";
        assert!(extract_structured_pricing(md).tiers.is_empty());
    }

    #[test]
    fn test_usage_and_subscription_models() {
        let usage = extract_structured_pricing("## Pay as you go\n$0.002 per request, metered usage");
        assert_eq!(usage.pricing_model, Some(PricingModel::UsageBased));

        let membership = extract_structured_pricing("Join the membership for $10/mo");
        assert_eq!(membership.pricing_model, Some(PricingModel::Subscription));
    }

    #[test]
    fn test_price_value() {
        assert_eq!(price_value("$1,299.00/yr"), Some(1299.0));
        assert_eq!(price_value("$0"), Some(0.0));
    }
}
