//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building a session client that always carries the `over18=1` cookie
//! - GET requests returning the page body
//! - Mapping non-success statuses to `HarvestError::Fetch`
//!
//! There is no retry: a failed fetch aborts the crawl.

use crate::HarvestError;
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Cookie that answers the site's "are you over 18?" interstitial
pub const AGE_GATE_COOKIE: &str = "over18=1";

/// Source of raw index page markup
///
/// The traversal engine only needs this one operation, so tests can swap the
/// network out for scripted pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    async fn fetch(&self, url: &str) -> Result<String, HarvestError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    async fn fetch(&self, url: &str) -> Result<String, HarvestError> {
        (**self).fetch(url).await
    }
}

/// reqwest-backed fetcher holding one crawl session
///
/// The cookie jar lives exactly as long as this value and is never written to
/// disk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a session for `domain` with the age-gate cookie pre-set
    ///
    /// # Arguments
    ///
    /// * `domain` - Site root the cookie is scoped to (e.g. "https://www.ptt.cc")
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ptt_harvest::crawler::HttpFetcher;
    ///
    /// let fetcher = HttpFetcher::new("https://www.ptt.cc").unwrap();
    /// ```
    pub fn new(domain: &str) -> Result<Self, HarvestError> {
        let jar = Jar::default();
        jar.add_cookie_str(AGE_GATE_COOKIE, &Url::parse(domain)?);

        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .cookie_provider(Arc::new(jar))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, HarvestError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Fetch {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fetcher() {
        assert!(HttpFetcher::new("https://www.ptt.cc").is_ok());
        assert!(HttpFetcher::new("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn test_build_fetcher_rejects_bad_domain() {
        let result = HttpFetcher::new("www.ptt.cc");
        assert!(matches!(result, Err(HarvestError::UrlParse(_))));
    }

    // Request-level behavior (cookie, status mapping) is covered with wiremock
    // in tests/integration.
}
