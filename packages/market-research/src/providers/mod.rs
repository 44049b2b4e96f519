//! Search provider clients and wrappers.

pub mod brave;
pub mod fallback;
pub mod hacker_news;
pub mod rate_limited;
pub mod retry;
pub mod tavily;

use std::sync::Arc;
use std::time::Duration;

pub use brave::BraveWebSearcher;
pub use fallback::FallbackSearcher;
pub use hacker_news::HackerNewsSearcher;
pub use rate_limited::{RateLimitExt, RateLimited};
pub use retry::{with_retry, RetryExt, RetryPolicy, Retrying};
pub use tavily::TavilyWebSearcher;

use crate::security::{SearchCredentials, SecretString};
use crate::traits::searcher::WebSearcher;
use crate::types::config::ResearchConfig;

/// Request timeout for clients built without one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A live provider: retries outside, rate limit inside, so every attempt
/// takes a permit.
pub type Provider<T> = Retrying<RateLimited<T>>;

fn provider<T>(client: T, config: &ResearchConfig) -> Provider<T> {
    client
        .rate_limited(config.requests_per_second)
        .retrying(config.retry)
}

pub fn tavily_provider(api_key: SecretString, config: &ResearchConfig) -> Provider<TavilyWebSearcher> {
    provider(TavilyWebSearcher::new(api_key).with_timeout(config.fetch_timeout), config)
}

pub fn brave_provider(api_key: SecretString, config: &ResearchConfig) -> Provider<BraveWebSearcher> {
    provider(BraveWebSearcher::new(api_key).with_timeout(config.fetch_timeout), config)
}

pub fn hacker_news_provider(config: &ResearchConfig) -> Provider<HackerNewsSearcher> {
    provider(HackerNewsSearcher::new().with_timeout(config.fetch_timeout), config)
}

/// Build the primary-then-secondary search chain from whatever credentials
/// are present. Each provider gets its own rate limiter.
pub fn search_chain(credentials: &SearchCredentials, config: &ResearchConfig) -> FallbackSearcher {
    let mut providers: Vec<Arc<dyn WebSearcher>> = Vec::new();

    if let Some(key) = &credentials.tavily {
        providers.push(Arc::new(tavily_provider(key.clone(), config)));
    }
    if let Some(key) = &credentials.brave {
        providers.push(Arc::new(brave_provider(key.clone(), config)));
    }

    FallbackSearcher::new(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order_follows_credentials() {
        let creds = SearchCredentials::new().with_tavily("t").with_brave("b");
        let chain = search_chain(&creds, &ResearchConfig::default());
        assert_eq!(chain.provider_names(), vec!["tavily", "brave"]);
    }

    #[test]
    fn test_chain_empty_without_credentials() {
        let chain = search_chain(&SearchCredentials::new(), &ResearchConfig::default());
        assert!(chain.is_empty());
    }

    #[test]
    fn test_providers_carry_configured_timeout() {
        let config = ResearchConfig::default().with_fetch_timeout(Duration::from_secs(3));

        let tavily = tavily_provider(SecretString::from("t"), &config);
        assert_eq!(tavily.inner().inner().timeout(), Duration::from_secs(3));

        let brave = brave_provider(SecretString::from("b"), &config);
        assert_eq!(brave.inner().inner().timeout(), Duration::from_secs(3));

        let hn = hacker_news_provider(&config);
        assert_eq!(hn.inner().inner().timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_bare_clients_are_bounded() {
        assert_eq!(HackerNewsSearcher::new().timeout(), DEFAULT_TIMEOUT);
        assert_eq!(TavilyWebSearcher::new(SecretString::from("t")).timeout(), DEFAULT_TIMEOUT);
    }
}
