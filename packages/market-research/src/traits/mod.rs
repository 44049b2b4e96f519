//! Capability interfaces for external collaborators.

pub mod fetcher;
pub mod research;
pub mod searcher;
pub mod stories;
