use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use market_research::{ResearchConfig, SearchCredentials};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub credentials: SearchCredentials,
    pub research: ResearchConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// At least one of `TAVILY_API_KEY` or `BRAVE_API_KEY` must be set.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut credentials = SearchCredentials::new();
        if let Ok(key) = env::var("TAVILY_API_KEY") {
            credentials = credentials.with_tavily(key);
        }
        if let Ok(key) = env::var("BRAVE_API_KEY") {
            credentials = credentials.with_brave(key);
        }
        if credentials.is_empty() {
            bail!("TAVILY_API_KEY or BRAVE_API_KEY must be set");
        }

        let mut research = ResearchConfig::default();
        if let Ok(secs) = env::var("FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?;
            research = research.with_fetch_timeout(Duration::from_secs(secs));
        }
        if let Ok(rps) = env::var("REQUESTS_PER_SECOND") {
            let rps: u32 = rps
                .parse()
                .context("REQUESTS_PER_SECOND must be a valid number")?;
            research = research.with_requests_per_second(rps);
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            credentials,
            research,
        })
    }
}
