//! Wire types for the catalog's import endpoint.
//!
//! The endpoint validates the payload itself (title of at least 3 chars,
//! positive price, absolute URLs). It also assigns the sequential 6-digit
//! product code and the slug, and resolves the category from the
//! breadcrumb. See [`crate::categories`] for a local preview of that last
//! step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/admin/import/mercadolivre`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub promo_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub reviews_count: Option<u64>,
    #[serde(default)]
    pub category_path: Vec<String>,
    #[serde(default)]
    pub category_name: String,
    /// Purchase link shown on the storefront. Supplied by the operator.
    pub affiliate_url: String,
    /// Marketplace page the product was read from.
    pub source_url: String,
}

/// What the import endpoint returns for an accepted product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReceipt {
    /// Sequential 6-digit product code, e.g. `"000123"`.
    #[serde(rename = "code6")]
    pub code: String,
    /// Storefront path of the new product, e.g. `"/produto/000123/fone-000123"`.
    #[serde(rename = "productUrl", default)]
    pub product_url: Option<String>,
}

impl ImportReceipt {
    /// Absolute storefront link for the imported product.
    ///
    /// Falls back to `/produto/<code>` when the endpoint did not send a path.
    #[must_use]
    pub fn storefront_url(&self, base_url: &str) -> String {
        let path = self
            .product_url
            .clone()
            .unwrap_or_else(|| format!("/produto/{}", self.code));
        format!("{}{path}", base_url.trim_end_matches('/'))
    }
}
