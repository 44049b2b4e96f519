//! The research tools.
//!
//! Each orchestrator takes its collaborators as trait objects so it can be
//! driven by the live providers or by the mocks in [`crate::testing`].

pub mod category_listing;
pub mod communities;
pub mod competitors;
pub mod market_size;
pub mod pricing;
pub mod report;
pub mod summary;

pub use category_listing::mine_category_listing;
pub use communities::{classify_platform, find_communities};
pub use competitors::search_competitors;
pub use market_size::{assemble_estimate, estimate_market_size};
pub use pricing::{extract_pricing, truncate_markdown};
pub use report::full_research_report;
pub use summary::summarize;
