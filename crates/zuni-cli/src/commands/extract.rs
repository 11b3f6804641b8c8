use std::path::Path;

use zuni_core::AppConfig;

use super::{obtain_draft, print_json};

/// Print the extracted draft for `url`.
///
/// A priceless draft is printed as-is; only import refuses it.
pub(crate) async fn run_extract(
    config: &AppConfig,
    url: &str,
    html_file: Option<&Path>,
) -> anyhow::Result<()> {
    let draft = obtain_draft(config, url, html_file).await?;
    if let Some(discount) = draft.discount_percent() {
        tracing::info!(discount_percent = discount, "promo price found");
    }
    print_json(&draft)
}
