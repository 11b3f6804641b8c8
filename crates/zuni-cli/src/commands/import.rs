use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use zuni_core::{load_category_seeds, place_category, AppConfig, ImportPayload, ImportReceipt};
use zuni_extract::{build_payload, ImportClient};

use super::{obtain_draft, print_json};

/// What `import` prints once the endpoint accepts a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportReport {
    code: String,
    storefront_url: String,
}

impl ImportReport {
    fn new(receipt: &ImportReceipt, base_url: &str) -> Self {
        Self {
            code: receipt.code.clone(),
            storefront_url: receipt.storefront_url(base_url),
        }
    }
}

/// Log where the catalog will file `payload`.
///
/// The endpoint decides the real placement; a missing or invalid seeds file
/// only skips the preview.
fn preview_category(config: &AppConfig, payload: &ImportPayload) {
    let seeds = match load_category_seeds(&config.categories_path) {
        Ok(file) => file.seeds,
        Err(e) => {
            tracing::warn!(
                path = %config.categories_path.display(),
                error = %e,
                "category preview skipped"
            );
            return;
        }
    };
    match place_category(&seeds, &payload.category_path, &payload.category_name) {
        Some(placement) => tracing::info!(
            seed = %placement.seed.name,
            subcategory = placement.subcategory.as_ref().map(|s| s.name.as_str()),
            "category preview"
        ),
        None => tracing::warn!("no seed category to preview against"),
    }
}

/// Extract `url`, build the import payload, and submit it unless `dry_run`.
///
/// The draft is printed before submission, so a rejected import can be
/// retried from a saved page without extracting again.
///
/// # Errors
///
/// Returns an error if extraction fails, the draft has no price, the
/// submission target is not configured, or the endpoint rejects the product.
pub(crate) async fn run_import(
    config: &AppConfig,
    url: &str,
    affiliate_url: &str,
    html_file: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let draft = obtain_draft(config, url, html_file).await?;
    print_json(&draft)?;

    let payload = build_payload(&draft, affiliate_url)?;
    preview_category(config, &payload);

    if dry_run {
        tracing::info!("dry-run: payload not submitted");
        return print_json(&payload);
    }

    let target = config.import_target()?;
    let client = ImportClient::new(&target, config.request_timeout_secs)
        .context("failed to build import client")?;
    let receipt = client.submit(&payload).await?;

    let report = ImportReport::new(&receipt, &target.base_url);
    tracing::info!(code = %report.code, url = %report.storefront_url, "imported");
    print_json(&report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_a_json_object_with_storefront_link() {
        let receipt = ImportReceipt {
            code: "000123".to_string(),
            product_url: Some("/produto/000123/fone-000123".to_string()),
        };
        let report = ImportReport::new(&receipt, "https://zuni.store/");
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&report).unwrap()).unwrap();
        assert_eq!(value["code"], "000123");
        assert_eq!(
            value["storefrontUrl"],
            "https://zuni.store/produto/000123/fone-000123"
        );
    }

    #[test]
    fn report_without_product_path_links_by_code() {
        let receipt = ImportReceipt {
            code: "000042".to_string(),
            product_url: None,
        };
        let report = ImportReport::new(&receipt, "https://zuni.store");
        assert_eq!(report.storefront_url, "https://zuni.store/produto/000042");
    }
}
