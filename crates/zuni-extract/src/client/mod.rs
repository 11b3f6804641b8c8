//! HTTP client for marketplace product pages.

mod host;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ExtractError;

pub use host::{host_matches, validate_product_url};

/// Fetches product pages from the marketplace.
///
/// Every URL is checked against the configured domain before any request is
/// made. There is no retry: one failed GET is one failed extraction.
pub struct MarketplaceClient {
    client: Client,
    domain: String,
}

impl MarketplaceClient {
    /// Creates a `MarketplaceClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, domain: &str) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            domain: domain.to_owned(),
        })
    }

    /// The marketplace domain this client accepts.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Parses `raw` and checks it against this client's domain.
    ///
    /// # Errors
    ///
    /// See [`validate_product_url`].
    pub fn validate_product_url(&self, raw: &str) -> Result<Url, ExtractError> {
        validate_product_url(raw, &self.domain)
    }

    /// Downloads the HTML of a product page.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::ExtractionUnavailable`] when the host is outside the
    ///   marketplace domain, the request fails, or the status is not 2xx.
    pub async fn fetch_html(&self, url: &Url) -> Result<String, ExtractError> {
        if !url.host_str().is_some_and(|h| host_matches(h, &self.domain)) {
            return Err(ExtractError::unavailable(
                url.as_str(),
                format!("not a {} page", self.domain),
            ));
        }

        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .send()
            .await
            .map_err(|e| ExtractError::unavailable(url.as_str(), format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "product page fetch failed");
            return Err(ExtractError::unavailable(
                url.as_str(),
                format!("page returned HTTP {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::unavailable(url.as_str(), format!("unreadable body: {e}")))?;
        tracing::debug!(url = %url, bytes = body.len(), "product page fetched");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
