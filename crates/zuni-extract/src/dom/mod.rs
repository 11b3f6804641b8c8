//! Product data read from the marketplace's page markup conventions.
//!
//! The selectors here track the marketplace's product-detail page family
//! (`ui-pdp-*` and `andes-*` classes). When the markup drifts, the
//! orchestrator falls back to the text-pattern strategy.

mod gallery;
mod price;

use std::sync::LazyLock;

use scraper::Selector;
use zuni_core::{ExtractionDraft, ExtractionMethod};

use crate::document::Page;
use crate::pipeline::ExtractionLimits;
use crate::reviews::resolve_reviews_count;

pub use gallery::gallery_images;
pub use price::{composite_amount, dom_prices, price_widgets};

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("valid selector"));
static NAV_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav ol").expect("valid selector"));
static ANY_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ol").expect("valid selector"));
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid selector"));

/// Description containers, most specific first.
static DESCRIPTION: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"p[data-testid="content"].ui-pdp-description__content"#,
        r#"[data-testid="content"].ui-pdp-description__content"#,
        ".ui-pdp-description__content",
    ]
    .iter()
    .map(|css| Selector::parse(css).expect("valid selector"))
    .collect()
});

/// First `<h1>` text, else the social-preview title.
#[must_use]
pub fn title(page: &Page) -> Option<String> {
    page.select_first(&HEADING)
        .map(|h1| h1.text())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            page.select_first(&OG_TITLE)
                .and_then(|meta| meta.non_blank_attr("content"))
                .map(crate::document::normalize_whitespace)
        })
}

#[must_use]
pub fn description(page: &Page) -> Option<String> {
    DESCRIPTION
        .iter()
        .find_map(|selector| page.select_first(selector))
        .map(|node| node.text())
        .filter(|t| !t.is_empty())
}

/// Breadcrumb labels from the first ordered list inside a `<nav>`, else the
/// first ordered list on the page.
#[must_use]
pub fn breadcrumb(page: &Page) -> Vec<String> {
    let Some(list) = page
        .select_first(&NAV_LIST)
        .or_else(|| page.select_first(&ANY_LIST))
    else {
        return Vec::new();
    };
    list.select_all(&LIST_ITEM)
        .map(|li| li.text())
        .filter(|t| !t.is_empty())
        .collect()
}

/// DOM heuristic strategy.
///
/// Returns `None` only when nothing at all was read; a draft with a title
/// but no price is still returned.
#[must_use]
pub fn extract(page: &Page, limits: &ExtractionLimits) -> Option<ExtractionDraft> {
    let mut draft = ExtractionDraft::empty(page.url().as_str(), ExtractionMethod::Dom);
    draft.title = title(page);
    draft.description = description(page);
    draft.category_path = breadcrumb(page);
    draft.category_name = draft.category_path.last().cloned();
    draft.images = gallery_images(page, limits);

    let prices = dom_prices(page, limits);
    draft.price = prices.price;
    draft.promo_price = prices.promo_price;
    draft.reviews_count = resolve_reviews_count(page);

    draft.has_any_field().then_some(draft)
}

#[cfg(test)]
#[path = "../dom_test.rs"]
mod tests;
