//! Value types produced and consumed by the research tools.

pub mod community;
pub mod competitor;
pub mod config;
pub mod market;
pub mod pricing;
pub mod report;
pub mod requests;
pub mod search;
