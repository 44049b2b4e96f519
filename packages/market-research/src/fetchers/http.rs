//! HTTP page fetcher.
//!
//! Fetches a URL with a bounded timeout and a descriptive user agent, then
//! converts the HTML body to markdown with `htmd`.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::providers::retry::{with_retry, RetryPolicy};
use crate::traits::fetcher::{FetchedPage, PageFetcher};

pub const DEFAULT_USER_AGENT: &str =
    "MarketResearchBot/0.1 (+business research assistant; fetches public pricing and product pages)";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static SCRIPT_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

pub struct HttpPageFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpPageFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch_once(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::from_reqwest(url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let (markdown, title) = if is_html {
            (html_to_markdown(&body), extract_title(&body))
        } else {
            (body, None)
        };

        debug!(url = %url, final_url = %final_url, chars = markdown.len(), "Page fetched");

        let mut page = FetchedPage::new(final_url, markdown);
        page.status = status.as_u16();
        page.title = title;
        Ok(page)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        with_retry(&self.retry, "page fetch", || self.fetch_once(url)).await
    }
}

/// Convert HTML to markdown, falling back to tag stripping.
pub fn html_to_markdown(html: &str) -> String {
    let cleaned = SCRIPT_STYLE_RE.replace_all(html, "");
    match htmd::convert(&cleaned) {
        Ok(markdown) => markdown.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "htmd conversion failed, stripping tags");
            let text = TAG_RE.replace_all(&cleaned, "\n");
            BLANK_LINES_RE
                .replace_all(&decode_entities(&text), "\n\n")
                .trim()
                .to_string()
        }
    }
}

/// Extract the `<title>` text.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|t| !t.is_empty())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_markdown() {
        let html = r#"
            <html><head><style>body { color: red; }</style></head>
            <body>
            <h2>Pro</h2>
            <p>$29/mo</p>
            <ul><li>Unlimited projects</li></ul>
            <script>track();</script>
            </body></html>
        "#;

        let md = html_to_markdown(html);

        assert!(md.contains("## Pro"));
        assert!(md.contains("$29/mo"));
        assert!(md.contains("Unlimited projects"));
        assert!(!md.contains("track()"));
        assert!(!md.contains("color: red"));
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title> Acme &amp; Co </title></head></html>";
        assert_eq!(extract_title(html), Some("Acme & Co".to_string()));
        assert_eq!(extract_title("<html><body>No title</body></html>"), None);
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_fetch() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(10)).unwrap();
        let page = fetcher.fetch("https://example.com").await.unwrap();
        assert!(page.has_content());
    }
}
