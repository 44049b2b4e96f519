//! Pure text-extraction utilities.
//!
//! Every function here takes text and returns structured values. No I/O,
//! no shared scan state: compiled patterns are immutable statics and each
//! call starts its own scan.

pub mod dollars;
pub mod growth;
pub mod links;
pub mod page;
pub mod pricing;
pub mod scope;

pub use dollars::{extract_dollar_figures, format_usd};
pub use growth::extract_growth_rate;
pub use links::{parse_listing_links, ListingLink};
pub use page::{extract_features, extract_tagline};
pub use pricing::extract_structured_pricing;
pub use scope::{classify_scope, classify_scope_with, split_sentences, AMBIGUOUS_SCOPE_DEFAULT};
