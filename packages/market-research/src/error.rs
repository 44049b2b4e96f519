//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors surfaced by the research tools.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// No usable provider is configured
    #[error("config error: {0}")]
    Config(String),

    /// Search provider failed
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// Page fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Providers answered but nothing usable came back
    #[error("no results: {0}")]
    NoResults(String),

    /// Every independent batch of an operation failed
    #[error("all {batches} search batches failed: {first_error}")]
    AllBatchesFailed { batches: usize, first_error: String },

    /// Caller supplied an invalid argument
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl ResearchError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Errors from web and forum search providers.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No search provider has credentials
    #[error("no search provider configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("{provider} request failed: {source}")]
    Http {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("{provider} API error {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// Provider signalled rate limiting
    #[error("{provider} rate limited")]
    RateLimited { provider: String },

    /// Request exceeded its deadline
    #[error("{provider} timed out")]
    Timeout { provider: String },

    /// Response body did not match the expected shape
    #[error("{provider} response could not be parsed: {reason}")]
    Decode { provider: String, reason: String },

    /// Every provider in a fallback chain failed
    #[error("all search providers failed: {}", .0.join("; "))]
    AllProvidersFailed(Vec<String>),
}

impl SearchError {
    /// Classify a reqwest error for a given provider.
    pub fn from_reqwest(provider: impl Into<String>, source: reqwest::Error) -> Self {
        let provider = provider.into();
        if source.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::Http { provider, source }
        }
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_status(provider: impl Into<String>, status: u16, body: String) -> Self {
        let provider = provider.into();
        if status == 429 {
            Self::RateLimited { provider }
        } else {
            Self::Status {
                provider,
                status,
                body,
            }
        }
    }
}

/// Errors that can occur fetching a single web page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Security validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

impl FetchError {
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Http { url, source }
        }
    }
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Errors worth retrying.
///
/// Timeouts, connection failures and explicit rate limiting are transient.
/// Everything else fails fast.
pub trait Retryable {
    fn is_transient(&self) -> bool;
}

impl Retryable for SearchError {
    fn is_transient(&self) -> bool {
        match self {
            SearchError::Timeout { .. } | SearchError::RateLimited { .. } => true,
            SearchError::Http { source, .. } => source.is_connect() || source.is_request(),
            SearchError::Status { status, .. } => *status == 429,
            _ => false,
        }
    }
}

impl Retryable for FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout { .. } => true,
            FetchError::Http { source, .. } => source.is_connect() || source.is_request(),
            FetchError::Status { status, .. } => *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for page fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
