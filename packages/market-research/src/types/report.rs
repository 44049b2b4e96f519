//! Full research report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    community::Community, competitor::Competitor, market::MarketSizeEstimate,
    pricing::PricingPage,
};

pub const SECTION_MARKET_SIZE: &str = "market_size";
pub const SECTION_COMPETITORS: &str = "competitors";
pub const SECTION_COMMUNITIES: &str = "communities";
pub const SECTION_PRICING: &str = "pricing";

/// A sub-operation's outcome within a report.
///
/// `data` is `None` exactly when the operation failed. A partial success
/// carries both data and an error describing what was lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection<T> {
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ReportSection<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn partial(data: T, error: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.data.is_none()
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ReportSection<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub key_takeaways: Vec<String>,
    /// Names of sections with no data, in report order.
    pub failed_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReport {
    pub business_idea: String,
    pub generated_at: DateTime<Utc>,
    pub market_size: ReportSection<MarketSizeEstimate>,
    pub competitors: ReportSection<Vec<Competitor>>,
    pub communities: ReportSection<Vec<Community>>,
    pub pricing: ReportSection<Vec<PricingPage>>,
    pub summary: ReportSummary,
}
