use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use scraper::Selector;

use crate::document::{Node, Page};
use crate::money::parse_plain_decimal;
use crate::pattern::price_from_text;
use crate::pipeline::ExtractionLimits;
use crate::price::{reconcile_original_and_current, PricePair};

static ORIGINAL_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "s.ui-pdp-price__original-value, .ui-pdp-price__original-value, s.andes-money-amount--previous",
    )
    .expect("valid selector")
});
static PRICE_META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[itemprop="price"]"#).expect("valid selector"));
static OFFER_AMOUNT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"[itemprop="offers"] .andes-money-amount, .ui-pdp-price__second-line .andes-money-amount"#,
    )
    .expect("valid selector")
});
static FRACTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".andes-money-amount__fraction").expect("valid selector"));
static CENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".andes-money-amount__cents").expect("valid selector"));

/// `"120 reais com 50 centavos"`, `"89 reais"`.
static ARIA_REAIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9.]*)\s*reais?(?:\s*com\s*([0-9]{1,2})\s*centavos?)?")
        .expect("valid regex")
});
static ARIA_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Amount of a composite money node: integer part and cents rendered in
/// separate children.
///
/// Grouping dots are removed from the integer part. Cents of one digit are
/// left-padded; missing or malformed cents read as `00`.
#[must_use]
pub fn composite_amount(node: Node<'_>) -> Option<Decimal> {
    let fraction: String = node
        .select_first(&FRACTION)?
        .text()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect();
    if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let cents = node
        .select_first(&CENTS)
        .map(|c| c.text())
        .filter(|c| (1..=2).contains(&c.len()) && c.chars().all(|ch| ch.is_ascii_digit()))
        .map_or_else(|| "00".to_string(), |c| format!("{c:0>2}"));

    Decimal::from_str(&format!("{fraction}.{cents}"))
        .ok()
        .filter(|d| *d > Decimal::ZERO)
}

/// Amount spoken in the node's `aria-label`.
fn aria_amount(node: Node<'_>) -> Option<Decimal> {
    let label = node.non_blank_attr("aria-label")?;
    if let Some(caps) = ARIA_REAIS_RE.captures(label) {
        let units = caps.get(1)?.as_str().replace('.', "");
        let cents = caps.get(2).map_or("00", |m| m.as_str());
        return Decimal::from_str(&format!("{units}.{cents:0>2}"))
            .ok()
            .filter(|d| *d > Decimal::ZERO);
    }
    let units = ARIA_NUMBER_RE.find(label)?.as_str();
    Decimal::from_str(units).ok().filter(|d| *d > Decimal::ZERO)
}

fn original_price(page: &Page) -> Option<Decimal> {
    let node = page.select_first(&ORIGINAL_PRICE)?;
    composite_amount(node).or_else(|| aria_amount(node))
}

fn current_price(page: &Page) -> Option<Decimal> {
    page.select_first(&PRICE_META)
        .and_then(|meta| meta.non_blank_attr("content"))
        .and_then(parse_plain_decimal)
        .or_else(|| page.select_first(&OFFER_AMOUNT).and_then(composite_amount))
}

/// Prices from the page's price widgets alone.
///
/// `None` when neither the crossed-out original nor a current price widget
/// could be read, or when the current price is not below the original.
#[must_use]
pub fn price_widgets(page: &Page) -> Option<PricePair> {
    reconcile_original_and_current(original_price(page), current_price(page))
}

/// Price widgets, falling back to a scan of the rendered text.
#[must_use]
pub fn dom_prices(page: &Page, limits: &ExtractionLimits) -> PricePair {
    price_widgets(page)
        .unwrap_or_else(|| price_from_text(page, limits))
        .sanitized()
}
