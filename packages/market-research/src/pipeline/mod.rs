//! Result-quality pipeline shared by the tools.
//!
//! - Relevance scoring and post-fetch product checks
//! - Outlier filtering and confidence for market figures
//! - Domain and URL dedup
//! - Query and topic construction
//! - The settle-all join used by every orchestrator

pub mod dedup;
pub mod domain;
pub mod outliers;
pub mod queries;
pub mod scoring;
pub mod settle;
pub mod topics;

pub use dedup::{canonical_domain, canonical_url, dedupe_by_domain, dedupe_by_key, dedupe_by_url};
pub use domain::{domain_name_sans_tld, hostname, same_site};
pub use outliers::{calculate_confidence, filter_outliers, spread};
pub use scoring::{
    is_blocked_domain, is_product_page, looks_like_product_domain, normalize_product_url,
    score_result, BASE_SCORE, SCORE_THRESHOLD,
};
pub use settle::{settle_all, Settled};
pub use topics::derive_topics;
