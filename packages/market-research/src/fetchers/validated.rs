//! SSRF-checked page fetcher.

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::security::UrlValidator;
use crate::traits::fetcher::{FetchedPage, PageFetcher};

/// A fetcher that validates URLs before and after fetching.
pub struct ValidatedFetcher<F: PageFetcher> {
    inner: F,
    validator: UrlValidator,
}

impl<F: PageFetcher> ValidatedFetcher<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: fetcher,
            validator: UrlValidator::new(),
        }
    }

    pub fn with_validator(fetcher: F, validator: UrlValidator) -> Self {
        Self {
            inner: fetcher,
            validator,
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for ValidatedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.validator.validate_with_dns(url).await?;

        let page = self.inner.fetch(url).await?;

        // Redirects may land somewhere internal
        if page.url != url {
            self.validator.validate(&page.url).map_err(FetchError::Security)?;
        }

        Ok(page)
    }
}
