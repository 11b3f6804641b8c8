//! Command handlers for the CLI.
//!
//! Each invocation extracts one page. Drafts and payloads go to stdout as
//! JSON; logs go to stderr.

pub(crate) mod extract;
pub(crate) mod import;

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use zuni_core::{AppConfig, ExtractionDraft};
use zuni_extract::{extract_html, ExtractionLimits, MarketplaceClient};

/// Extract a draft for `url`, from `html_file` when given, otherwise by
/// fetching the page.
///
/// A saved page counts as a rendered document and uses the tighter limits.
/// The URL is checked against the marketplace domain either way.
pub(crate) async fn obtain_draft(
    config: &AppConfig,
    url: &str,
    html_file: Option<&Path>,
) -> anyhow::Result<ExtractionDraft> {
    let client = MarketplaceClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.marketplace_domain,
    )
    .context("failed to build marketplace client")?;
    let page_url = client.validate_product_url(url)?;

    let draft = match html_file {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read saved page {}", path.display()))?;
            extract_html(&html, &page_url, &ExtractionLimits::RENDERED)?
        }
        None => {
            let html = client.fetch_html(&page_url).await?;
            extract_html(&html, &page_url, &ExtractionLimits::FETCHED)?
        }
    };
    Ok(draft)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
