//! Hand-off of an extracted draft to the catalog's import endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use zuni_core::{ExtractionDraft, ImportPayload, ImportReceipt, ImportTarget};

use crate::error::ExtractError;

pub const IMPORT_PATH: &str = "/api/admin/import/mercadolivre";

/// Title sent when the page had none the endpoint would accept.
const FALLBACK_TITLE: &str = "Produto";
const MIN_TITLE_CHARS: usize = 3;

fn is_absolute_http(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Builds the import body for `draft`.
///
/// # Errors
///
/// - [`ExtractError::MissingPrice`] when the draft has no price.
/// - [`ExtractError::InvalidAffiliateUrl`] when `affiliate_url` is not an
///   absolute `http(s)` URL.
pub fn build_payload(
    draft: &ExtractionDraft,
    affiliate_url: &str,
) -> Result<ImportPayload, ExtractError> {
    let price = draft.price.ok_or(ExtractError::MissingPrice)?;

    let affiliate_url = affiliate_url.trim();
    if !is_absolute_http(affiliate_url) {
        return Err(ExtractError::InvalidAffiliateUrl {
            url: affiliate_url.to_owned(),
            reason: "must be an absolute http(s) URL".to_owned(),
        });
    }

    let title = draft
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| t.chars().count() >= MIN_TITLE_CHARS)
        .unwrap_or(FALLBACK_TITLE)
        .to_owned();

    let category_name = draft
        .category_name
        .clone()
        .or_else(|| draft.category_path.last().cloned())
        .unwrap_or_default();

    Ok(ImportPayload {
        title,
        description: draft.description.clone().unwrap_or_default(),
        images: draft
            .images
            .iter()
            .filter(|u| is_absolute_http(u))
            .cloned()
            .collect(),
        price,
        promo_price: draft.promo_price.filter(|p| *p < price),
        rating: draft.rating,
        reviews_count: draft.reviews_count,
        category_path: draft.category_path.clone(),
        category_name,
        affiliate_url: affiliate_url.to_owned(),
        source_url: draft.source_url.clone(),
    })
}

/// Fields of the endpoint's reply that decide acceptance.
#[derive(Debug, Deserialize)]
struct ImportStatus {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the catalog's import endpoint.
pub struct ImportClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ImportClient {
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(target: &ImportTarget, timeout_secs: u64) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{IMPORT_PATH}", target.base_url.trim_end_matches('/')),
            token: target.token.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `payload` and returns the endpoint's receipt.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::SubmissionRejected`] on a non-2xx status or a body
    ///   with `"ok": false`, carrying the endpoint's `error` text when sent.
    /// - [`ExtractError::Http`] when the request cannot be sent.
    /// - [`ExtractError::Deserialize`] when an accepted reply is not a receipt.
    pub async fn submit(&self, payload: &ImportPayload) -> Result<ImportReceipt, ExtractError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let reply = serde_json::from_str::<ImportStatus>(&body).ok();

        let accepted = status.is_success() && reply.as_ref().is_some_and(|r| r.ok);
        if !accepted {
            let message = reply
                .and_then(|r| r.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Erro {}", status.as_u16()));
            tracing::warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                message = %message,
                "import rejected"
            );
            return Err(ExtractError::SubmissionRejected {
                status: status.as_u16(),
                message,
            });
        }

        let receipt =
            serde_json::from_str::<ImportReceipt>(&body).map_err(|e| ExtractError::Deserialize {
                context: format!("import receipt from {}", self.endpoint),
                source: e,
            })?;
        tracing::info!(
            code = %receipt.code,
            source_url = %payload.source_url,
            "product imported"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
