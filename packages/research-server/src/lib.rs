//! HTTP surface for the research tools.

pub mod config;
pub mod server;

pub use config::Config;
