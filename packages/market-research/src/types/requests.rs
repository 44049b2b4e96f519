//! Tool inputs.
//!
//! Each request validates itself before an orchestrator runs; the server
//! deserializes these straight from request bodies.

use serde::{Deserialize, Serialize};

use super::market::Geography;
use crate::error::{ResearchError, Result};

pub const DEFAULT_MAX_COMPETITORS: usize = 5;
pub const MAX_COMPETITORS_LIMIT: usize = 20;

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ResearchError::invalid_input(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSizeRequest {
    pub industry: String,
    #[serde(default)]
    pub geography: Geography,
}

impl MarketSizeRequest {
    pub fn new(industry: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            geography: Geography::default(),
        }
    }

    pub fn with_geography(mut self, geography: Geography) -> Self {
        self.geography = geography;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("industry", &self.industry)
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_COMPETITORS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRequest {
    pub industry: String,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl CompetitorRequest {
    pub fn new(industry: impl Into<String>) -> Self {
        Self {
            industry: industry.into(),
            product_type: None,
            max_results: DEFAULT_MAX_COMPETITORS,
        }
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn product_type(&self) -> Option<&str> {
        non_blank(self.product_type.as_ref())
    }

    /// `max_results` clamped to `1..=20`.
    pub fn limit(&self) -> usize {
        self.max_results.clamp(1, MAX_COMPETITORS_LIMIT)
    }

    pub fn validate(&self) -> Result<()> {
        require("industry", &self.industry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityRequest {
    pub target_audience: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl CommunityRequest {
    pub fn new(target_audience: impl Into<String>, topics: Vec<String>) -> Self {
        Self {
            target_audience: target_audience.into(),
            topics,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("target_audience", &self.target_audience)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub url: String,
    #[serde(default)]
    pub competitor_name: Option<String>,
}

impl PricingRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            competitor_name: None,
        }
    }

    pub fn with_competitor_name(mut self, name: impl Into<String>) -> Self {
        self.competitor_name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require("url", &self.url)?;
        match url::Url::parse(self.url.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            Ok(parsed) => Err(ResearchError::invalid_input(format!(
                "url must be http or https, got {}",
                parsed.scheme()
            ))),
            Err(e) => Err(ResearchError::invalid_input(format!("url is not valid: {}", e))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub business_idea: String,
    #[serde(default)]
    pub target_segment: Option<String>,
    #[serde(default)]
    pub geography: Option<Geography>,
    #[serde(default)]
    pub product_type: Option<String>,
}

impl ReportRequest {
    pub fn new(business_idea: impl Into<String>) -> Self {
        Self {
            business_idea: business_idea.into(),
            ..Default::default()
        }
    }

    pub fn with_target_segment(mut self, segment: impl Into<String>) -> Self {
        self.target_segment = Some(segment.into());
        self
    }

    pub fn with_geography(mut self, geography: Geography) -> Self {
        self.geography = Some(geography);
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn target_segment(&self) -> Option<&str> {
        non_blank(self.target_segment.as_ref())
    }

    pub fn product_type(&self) -> Option<&str> {
        non_blank(self.product_type.as_ref())
    }

    pub fn validate(&self) -> Result<()> {
        require("business_idea", &self.business_idea)
    }

    /// Market-size input: the idea at the requested geography.
    pub fn market_request(&self) -> MarketSizeRequest {
        MarketSizeRequest::new(self.business_idea.trim())
            .with_geography(self.geography.unwrap_or_default())
    }

    /// Competitor input: the segment refines the product type.
    pub fn competitor_request(&self) -> CompetitorRequest {
        let product_type = match (self.product_type(), self.target_segment()) {
            (Some(product), Some(segment)) => Some(format!("{} {}", product, segment)),
            (Some(product), None) => Some(product.to_string()),
            (None, Some(segment)) => Some(segment.to_string()),
            (None, None) => None,
        };
        CompetitorRequest {
            industry: self.business_idea.trim().to_string(),
            product_type,
            max_results: DEFAULT_MAX_COMPETITORS,
        }
    }

    /// Community input: the segment narrows the audience.
    pub fn community_request(&self, topics: Vec<String>) -> CommunityRequest {
        let audience = match self.target_segment() {
            Some(segment) => format!("{} {}", self.business_idea.trim(), segment),
            None => self.business_idea.trim().to_string(),
        };
        CommunityRequest::new(audience, topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_request_defaults_from_json() {
        let req: CompetitorRequest = serde_json::from_str(r#"{"industry":"crm"}"#).unwrap();
        assert_eq!(req.max_results, 5);
        assert_eq!(req.product_type(), None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_max_results_clamped() {
        assert_eq!(CompetitorRequest::new("crm").with_max_results(0).limit(), 1);
        assert_eq!(CompetitorRequest::new("crm").with_max_results(99).limit(), 20);
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            MarketSizeRequest::new("  ").validate(),
            Err(ResearchError::InvalidInput { .. })
        ));
        assert!(CommunityRequest::new("", vec![]).validate().is_err());
        assert!(ReportRequest::new("").validate().is_err());
    }

    #[test]
    fn test_pricing_url_validation() {
        assert!(PricingRequest::new("https://acme.io").validate().is_ok());
        assert!(PricingRequest::new("acme.io/pricing").validate().is_err());
        assert!(PricingRequest::new("ftp://acme.io").validate().is_err());
    }

    #[test]
    fn test_geography_parses_lowercase() {
        let req: MarketSizeRequest =
            serde_json::from_str(r#"{"industry":"crm","geography":"apac"}"#).unwrap();
        assert_eq!(req.geography, Geography::Apac);
    }

    #[test]
    fn test_report_refinements() {
        let req = ReportRequest::new("dog walking")
            .with_target_segment("seniors")
            .with_product_type("app");

        assert_eq!(
            req.competitor_request().product_type.as_deref(),
            Some("app seniors")
        );
        assert_eq!(
            req.community_request(vec![]).target_audience,
            "dog walking seniors"
        );
        assert_eq!(req.market_request().geography, Geography::Global);
    }
}
