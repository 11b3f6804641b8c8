//! Review-count resolution.
//!
//! The review widget on marketplace pages changes shape often, so five
//! independent readers run over the same page and the largest valid count
//! wins. A stray large number matching the body-text pattern can push the
//! result up; that is accepted as a limit of the heuristic.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::document::Page;

/// Counts at or above this are treated as misreads.
pub const MAX_REVIEWS: u64 = 10_000_000;

static REVIEWS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*)\s*avalia(?:ções|ção|çoes|coes|cao|cão)").expect("valid regex")
});
static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9][0-9.,]*").expect("valid regex"));
static PARENS_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9][0-9.,]*)\)").expect("valid regex"));
static SCRIPT_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:reviewCount|total_reviews|reviews_count)"\s*:\s*"?([0-9]+)"#)
        .expect("valid regex")
});

static CAPABILITY_ROOT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#reviews_capability_v3").expect("valid selector"));
static CAPABILITY_LABEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p.ui-review-capability__rating__label").expect("valid selector")
});
static CAPABILITY_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, span, div").expect("valid selector"));
static RATING_LABEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".ui-review-capability__rating__label").expect("valid selector")
});
static HEADER_REVIEW_AMOUNT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".ui-pdp-header__info .ui-pdp-review__amount").expect("valid selector")
});

type Reader = fn(&Page) -> Option<u64>;

const READERS: [(&str, Reader); 5] = [
    ("capability", from_capability_region),
    ("rating_label", from_rating_labels),
    ("body_text", from_body_text),
    ("script_fields", from_script_fields),
    ("header_amount", from_header_amount),
];

/// Parse a review count such as `"19.304"` or `"1,204"`.
///
/// Grouping separators are removed; the result must be in `1..10_000_000`.
#[must_use]
pub fn parse_review_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| *c != '.' && *c != ',').collect();
    digits
        .parse::<u64>()
        .ok()
        .filter(|n| (1..MAX_REVIEWS).contains(n))
}

/// Largest valid review count any reader finds on the page.
#[must_use]
pub fn resolve_reviews_count(page: &Page) -> Option<u64> {
    READERS
        .iter()
        .filter_map(|(name, reader)| {
            let found = reader(page);
            tracing::debug!(reader = name, count = ?found, "review-count reader finished");
            found
        })
        .max()
}

fn labelled_count(text: &str) -> Option<u64> {
    REVIEWS_RE
        .captures_iter(text)
        .filter_map(|caps| parse_review_count(caps.get(1)?.as_str()))
        .max()
}

fn from_capability_region(page: &Page) -> Option<u64> {
    let root = page.select_first(&CAPABILITY_ROOT)?;

    let labelled = root
        .select_first(&CAPABILITY_LABEL)
        .and_then(|label| labelled_count(&label.text()));
    if labelled.is_some() {
        return labelled;
    }

    root.select_all(&CAPABILITY_TEXT)
        .filter_map(|node| {
            let text = node.text();
            if !text.to_lowercase().contains("avalia") {
                return None;
            }
            labelled_count(&text).or_else(|| {
                FIRST_NUMBER_RE
                    .find(&text)
                    .and_then(|m| parse_review_count(m.as_str()))
            })
        })
        .max()
}

fn from_rating_labels(page: &Page) -> Option<u64> {
    page.select_all(&RATING_LABEL)
        .filter_map(|node| labelled_count(&node.text()))
        .max()
}

fn from_body_text(page: &Page) -> Option<u64> {
    labelled_count(page.rendered_text())
}

fn from_script_fields(page: &Page) -> Option<u64> {
    SCRIPT_FIELD_RE
        .captures_iter(page.source())
        .filter_map(|caps| parse_review_count(caps.get(1)?.as_str()))
        .max()
}

fn from_header_amount(page: &Page) -> Option<u64> {
    page.select_all(&HEADER_REVIEW_AMOUNT)
        .filter_map(|node| {
            let text = node.text();
            let raw = PARENS_NUMBER_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .or_else(|| FIRST_NUMBER_RE.find(&text))?;
            parse_review_count(raw.as_str())
        })
        .max()
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;
