//! Last-resort price scan over rendered page text.
//!
//! Only prices come out of this strategy. Title, images, rating and
//! breadcrumb stay empty when it is the one that succeeds.

use std::sync::LazyLock;

use regex::Regex;
use zuni_core::{ExtractionDraft, ExtractionMethod};

use crate::document::Page;
use crate::money::{parse_brl_digits, MoneyAmount};
use crate::pipeline::ExtractionLimits;
use crate::price::{disambiguate, PricePair};

/// `R$ 1.234,56`, optionally preceded by the "previous price" marker `de`.
static PRICE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\bde\s*)?R\$\s*([0-9.]+,[0-9]{2})").expect("valid regex")
});

/// Collect currency tokens from `text`, in order, up to `max_tokens`.
///
/// Tokens whose amount does not parse to a positive value are skipped and do
/// not count towards the limit.
#[must_use]
pub fn scan_price_tokens(text: &str, max_tokens: usize) -> Vec<MoneyAmount> {
    PRICE_TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let amount = parse_brl_digits(caps.get(2)?.as_str())?;
            Some(MoneyAmount {
                amount,
                is_previous: caps.get(1).is_some(),
            })
        })
        .take(max_tokens)
        .collect()
}

/// Scan the leading text window of `page` and disambiguate what was found.
#[must_use]
pub fn price_from_text(page: &Page, limits: &ExtractionLimits) -> PricePair {
    let window = page.text_window(limits.text_window_chars);
    disambiguate(&scan_price_tokens(window, limits.max_price_tokens))
}

/// Text-pattern strategy: a draft carrying only prices, or `None` when the
/// page text holds no currency token.
#[must_use]
pub fn extract(page: &Page, limits: &ExtractionLimits) -> Option<ExtractionDraft> {
    let prices = price_from_text(page, limits).sanitized();
    prices.price?;

    let mut draft = ExtractionDraft::empty(page.url().as_str(), ExtractionMethod::Pattern);
    draft.price = prices.price;
    draft.promo_price = prices.promo_price;
    Some(draft)
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod tests;
