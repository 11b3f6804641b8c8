use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a draft. Diagnostic only; nothing
/// downstream branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Structured,
    Dom,
    Pattern,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::Structured => write!(f, "structured"),
            ExtractionMethod::Dom => write!(f, "dom"),
            ExtractionMethod::Pattern => write!(f, "pattern"),
        }
    }
}

/// A product record read from one marketplace page.
///
/// Created fresh for each extraction and handed straight to the caller.
/// Invariants upheld by the extraction pipeline before a draft is returned:
///
/// - `images` never holds two URLs that are equal once the query string is
///   stripped.
/// - `price`, when present, is positive; `promo_price`, when present, is
///   strictly below `price`.
/// - `reviews_count`, when present, is in `1..10_000_000`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute image URLs, gallery order.
    pub images: Vec<String>,
    /// Regular price in BRL.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Discounted price in BRL.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub promo_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,
    pub reviews_count: Option<u64>,
    /// Breadcrumb labels, root first.
    pub category_path: Vec<String>,
    /// Normally the last entry of `category_path`.
    pub category_name: Option<String>,
    pub source_url: String,
    pub method: ExtractionMethod,
}

impl ExtractionDraft {
    /// An empty draft attributed to `method`.
    #[must_use]
    pub fn empty(source_url: &str, method: ExtractionMethod) -> Self {
        Self {
            title: None,
            description: None,
            images: Vec::new(),
            price: None,
            promo_price: None,
            rating: None,
            reviews_count: None,
            category_path: Vec::new(),
            category_name: None,
            source_url: source_url.to_owned(),
            method,
        }
    }

    /// Returns `true` if at least one product field was read from the page.
    ///
    /// `source_url` and `method` are bookkeeping and do not count.
    #[must_use]
    pub fn has_any_field(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || !self.images.is_empty()
            || self.price.is_some()
            || self.promo_price.is_some()
            || self.rating.is_some()
            || self.reviews_count.is_some()
            || !self.category_path.is_empty()
    }

    /// Whole-percent discount of `promo_price` against `price`, rounded half up.
    ///
    /// `None` unless both prices are present and the promo is below the price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let (price, promo) = (self.price?, self.promo_price?);
        if price <= Decimal::ZERO || promo >= price {
            return None;
        }
        ((Decimal::ONE - promo / price) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}
