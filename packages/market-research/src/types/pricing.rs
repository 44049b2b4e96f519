//! Pricing page types.

use serde::{Deserialize, Serialize};

use super::competitor::MAX_FEATURES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Annual,
    Free,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    FlatRate,
    PerUser,
    UsageBased,
    Subscription,
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PricingModel::FlatRate => "flat-rate",
            PricingModel::PerUser => "per-user",
            PricingModel::UsageBased => "usage-based",
            PricingModel::Subscription => "subscription",
        };
        f.write_str(label)
    }
}

/// One priced plan on a pricing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl PricingTier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
            billing_period: None,
            features: None,
        }
    }

    pub fn with_price(mut self, price: Option<String>) -> Self {
        self.price = price;
        self
    }

    pub fn with_billing_period(mut self, period: Option<BillingPeriod>) -> Self {
        self.billing_period = period;
        self
    }

    /// Attach features, keeping at most five. Empty lists are dropped.
    pub fn with_features(mut self, mut features: Vec<String>) -> Self {
        features.truncate(MAX_FEATURES);
        self.features = (!features.is_empty()).then_some(features);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredPricing {
    pub tiers: Vec<PricingTier>,
    pub has_free_tier: bool,
    pub has_enterprise: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<PricingModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Result of `extract_pricing`. Failures are encoded in the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_name: Option<String>,
    pub markdown_content: String,
    pub extraction_hints: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_pricing: Option<StructuredPricing>,
}

impl PricingPage {
    /// A degraded result describing why the page could not be read.
    pub fn failed(url: impl Into<String>, competitor_name: Option<String>, reason: &str) -> Self {
        Self {
            url: url.into(),
            competitor_name,
            markdown_content: format!("Failed to fetch pricing page: {}", reason),
            extraction_hints: format!("Pricing extraction failed: {}", reason),
            structured_pricing: None,
        }
    }

    /// True when the page was fetched and read.
    pub fn is_fetched(&self) -> bool {
        self.structured_pricing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(PricingModel::UsageBased).unwrap(),
            "usage-based"
        );
        assert_eq!(
            serde_json::to_value(PricingModel::FlatRate).unwrap(),
            "flat-rate"
        );
        assert_eq!(serde_json::to_value(BillingPeriod::Annual).unwrap(), "annual");
    }

    #[test]
    fn test_failed_page_carries_reason_twice() {
        let page = PricingPage::failed("https://acme.io", None, "HTTP 503");
        assert!(page.markdown_content.contains("HTTP 503"));
        assert!(page.extraction_hints.contains("HTTP 503"));
        assert!(!page.is_fetched());
    }
}
