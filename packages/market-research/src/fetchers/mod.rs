//! Page fetcher implementations.

pub mod http;
pub mod validated;

pub use http::{html_to_markdown, HttpPageFetcher, DEFAULT_USER_AGENT};
pub use validated::ValidatedFetcher;
