//! Extraction orchestrator.
//!
//! Strategies run in a fixed order and the first usable draft wins:
//! structured data, then DOM heuristics, then the text-pattern scan. A
//! structured draft with a price but no promo gets one backfill pass from
//! the DOM price step.

use reqwest::Url;
use zuni_core::{ExtractionDraft, ExtractionMethod};

use crate::document::Page;
use crate::dom;
use crate::error::ExtractError;
use crate::images::dedup_and_cap;
use crate::pattern;
use crate::price::PricePair;
use crate::reviews::MAX_REVIEWS;
use crate::structured;

/// Cost bounds for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    /// Leading characters of rendered text scanned for price tokens.
    pub text_window_chars: usize,
    /// Price tokens collected before disambiguation.
    pub max_price_tokens: usize,
    pub max_images: usize,
}

impl ExtractionLimits {
    /// For a live rendered document saved from the browser.
    pub const RENDERED: Self = Self {
        text_window_chars: 12_000,
        max_price_tokens: 6,
        max_images: 12,
    };

    /// For HTML fetched out-of-band.
    pub const FETCHED: Self = Self {
        text_window_chars: 15_000,
        max_price_tokens: 10,
        max_images: 30,
    };
}

type Strategy = fn(&Page, &ExtractionLimits) -> Option<ExtractionDraft>;

const STRATEGIES: [(ExtractionMethod, Strategy); 3] = [
    (ExtractionMethod::Structured, structured::extract),
    (ExtractionMethod::Dom, dom::extract),
    (ExtractionMethod::Pattern, pattern::extract),
];

/// Run every strategy in order over `page` and return the first usable draft.
///
/// A draft without a price is still a successful extraction; refusing to
/// submit it is the caller's job.
///
/// # Errors
///
/// - [`ExtractError::ExtractionUnavailable`] when the page has no markup.
/// - [`ExtractError::NoDataExtracted`] when no strategy read any field.
pub fn extract_page(page: &Page, limits: &ExtractionLimits) -> Result<ExtractionDraft, ExtractError> {
    if page.is_blank() {
        return Err(ExtractError::unavailable(
            page.url().as_str(),
            "the page has no content",
        ));
    }

    for (method, strategy) in STRATEGIES {
        let Some(draft) = strategy(page, limits) else {
            tracing::debug!(url = %page.url(), %method, "strategy produced nothing");
            continue;
        };
        let draft = if method == ExtractionMethod::Structured {
            backfill_promo(page, limits, draft)
        } else {
            draft
        };
        let draft = finalize(draft, limits);
        if !draft.has_any_field() {
            tracing::debug!(url = %page.url(), %method, "strategy draft had no usable fields");
            continue;
        }

        if draft.price.is_none() {
            tracing::warn!(url = %page.url(), %method, "extracted product has no price");
        }
        tracing::info!(
            url = %page.url(),
            %method,
            price = ?draft.price,
            promo_price = ?draft.promo_price,
            images = draft.images.len(),
            "product extracted"
        );
        return Ok(draft);
    }

    Err(ExtractError::NoDataExtracted {
        url: page.url().to_string(),
    })
}

/// Parse `html` as the page at `url` and extract from it.
///
/// The parsed document is dropped before returning, so the result can be
/// carried across `.await` points.
///
/// # Errors
///
/// See [`extract_page`].
pub fn extract_html(
    html: &str,
    url: &Url,
    limits: &ExtractionLimits,
) -> Result<ExtractionDraft, ExtractError> {
    let page = Page::parse(html, url.clone());
    extract_page(&page, limits)
}

/// Fill a missing promo on a structured draft from the DOM price step.
///
/// Both fields are overwritten only when the DOM step produced a complete
/// pair; everything else on the draft is kept.
fn backfill_promo(page: &Page, limits: &ExtractionLimits, draft: ExtractionDraft) -> ExtractionDraft {
    if draft.price.is_none() || draft.promo_price.is_some() {
        return draft;
    }
    let dom_prices = dom::dom_prices(page, limits);
    if !dom_prices.is_complete() {
        return draft;
    }
    tracing::info!(
        url = %page.url(),
        price = ?dom_prices.price,
        promo_price = ?dom_prices.promo_price,
        "promo price backfilled from page markup"
    );
    ExtractionDraft {
        price: dom_prices.price,
        promo_price: dom_prices.promo_price,
        ..draft
    }
}

/// Enforce draft invariants on whatever a strategy returned.
pub(crate) fn finalize(draft: ExtractionDraft, limits: &ExtractionLimits) -> ExtractionDraft {
    let prices = PricePair {
        price: draft.price,
        promo_price: draft.promo_price,
    }
    .sanitized();
    let title = draft.title.filter(|t| !t.trim().is_empty());
    let description = draft.description.filter(|d| !d.trim().is_empty());
    let category_path: Vec<String> = draft
        .category_path
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .collect();
    let category_name = draft
        .category_name
        .filter(|c| !c.trim().is_empty())
        .or_else(|| category_path.last().cloned());

    ExtractionDraft {
        title,
        description,
        images: dedup_and_cap(draft.images, limits.max_images),
        price: prices.price,
        promo_price: prices.promo_price,
        rating: draft.rating.filter(|r| !r.is_sign_negative()),
        reviews_count: draft.reviews_count.filter(|n| (1..MAX_REVIEWS).contains(n)),
        category_path,
        category_name,
        ..draft
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
