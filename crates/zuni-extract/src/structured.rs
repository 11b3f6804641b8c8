//! Product data from embedded JSON-LD blocks.

use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use scraper::Selector;
use serde_json::Value;
use zuni_core::{ExtractionDraft, ExtractionMethod};

use crate::document::{normalize_whitespace, Page};
use crate::dom;
use crate::images::ImageList;
use crate::money::parse_plain_decimal;
use crate::pipeline::ExtractionLimits;
use crate::price::from_offer_range;
use crate::reviews::{parse_review_count, resolve_reviews_count, MAX_REVIEWS};

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// Deepest nesting searched for a typed node. JSON-LD payloads are shallow
/// trees; anything deeper is ignored.
const MAX_SEARCH_DEPTH: usize = 32;

/// Every JSON-LD block on the page that parses.
///
/// A block that fails to parse is logged and skipped; the remaining blocks
/// are still returned.
#[must_use]
pub fn structured_blocks(page: &Page) -> Vec<Value> {
    page.select_all(&LD_JSON_SELECTOR)
        .enumerate()
        .filter_map(|(index, node)| {
            let raw = node.raw_text();
            if raw.trim().is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(
                        url = %page.url(),
                        block = index,
                        error = %e,
                        "skipping malformed structured-data block"
                    );
                    None
                }
            }
        })
        .collect()
}

fn declares_type(node: &Value, matches: impl Fn(&str) -> bool) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => matches(t.as_str()),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// `@type` is, or includes, something containing "product" (any case).
fn is_product_node(node: &Value) -> bool {
    declares_type(node, |t| t.to_lowercase().contains("product"))
}

fn is_breadcrumb_node(node: &Value) -> bool {
    declares_type(node, |t| t.eq_ignore_ascii_case("BreadcrumbList"))
}

/// Depth-first search for the first object satisfying `predicate`.
///
/// Children are visited in document order. Nodes nested deeper than
/// [`MAX_SEARCH_DEPTH`] are not inspected.
fn find_node<'v>(root: &'v Value, predicate: fn(&Value) -> bool) -> Option<&'v Value> {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_SEARCH_DEPTH {
            continue;
        }
        match node {
            Value::Object(map) => {
                if predicate(node) {
                    return Some(node);
                }
                stack.extend(map.values().rev().map(|child| (child, depth + 1)));
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|child| (child, depth + 1)));
            }
            _ => {}
        }
    }
    None
}

/// First product-typed node across `blocks`, in block order.
#[must_use]
pub fn find_product(blocks: &[Value]) -> Option<&Value> {
    blocks.iter().find_map(|block| find_node(block, is_product_node))
}

fn decimal_field(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
                .filter(|d| *d > Decimal::ZERO)
        }
        Value::String(s) => parse_plain_decimal(s),
        _ => None,
    }
}

fn count_field(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().filter(|n| (1..MAX_REVIEWS).contains(n)),
        Value::String(s) => parse_review_count(s.trim()),
        _ => None,
    }
}

fn text_field(node: &Value, key: &str) -> Option<String> {
    node.get(key)
        .and_then(Value::as_str)
        .map(normalize_whitespace)
        .filter(|s| !s.is_empty())
}

/// `image` may be a URL, an `ImageObject`, or an array of either.
fn image_urls(node: &Value) -> Vec<&str> {
    fn one(value: &Value) -> Option<&str> {
        match value {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj
                .get("url")
                .or_else(|| obj.get("contentUrl"))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    match node.get("image") {
        Some(Value::Array(items)) => items.iter().filter_map(one).collect(),
        Some(other) => one(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn first_offer(product: &Value) -> Option<&Value> {
    let offers = product.get("offers")?;
    match offers {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(offers),
        _ => None,
    }
}

/// Breadcrumb labels from the first `BreadcrumbList`, ordered by `position`.
#[must_use]
pub fn breadcrumb(blocks: &[Value]) -> Vec<String> {
    let Some(list) = blocks
        .iter()
        .find_map(|block| find_node(block, is_breadcrumb_node))
    else {
        return Vec::new();
    };
    let Some(items) = list.get("itemListElement").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut crumbs: Vec<(u64, String)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let name = text_field(item, "name")
                .or_else(|| item.get("item").and_then(|i| text_field(i, "name")))?;
            let position = item
                .get("position")
                .and_then(|p| p.as_u64().or_else(|| p.as_str()?.trim().parse().ok()))
                .unwrap_or(index as u64 + 1);
            Some((position, name))
        })
        .collect();
    crumbs.sort_by_key(|(position, _)| *position);
    crumbs.into_iter().map(|(_, name)| name).collect()
}

/// Structured-data strategy.
///
/// Returns a draft as soon as a product-typed node exists, even when it
/// carries no price; the orchestrator decides what to do with gaps.
#[must_use]
pub fn extract(page: &Page, limits: &ExtractionLimits) -> Option<ExtractionDraft> {
    let blocks = structured_blocks(page);
    let product = find_product(&blocks)?;

    let mut draft = ExtractionDraft::empty(page.url().as_str(), ExtractionMethod::Structured);
    draft.title = text_field(product, "name");
    draft.description = text_field(product, "description").or_else(|| dom::description(page));

    let mut images = ImageList::new(limits.max_images);
    for url in image_urls(product) {
        if let Some(resolved) = page.resolve_url(url) {
            images.push(resolved);
        }
    }
    let gallery = dom::gallery_images(page, limits);
    draft.images = if gallery.len() > images.len() {
        gallery
    } else {
        images.into_vec()
    };

    if let Some(offer) = first_offer(product) {
        let prices = from_offer_range(
            decimal_field(offer.get("highPrice")),
            decimal_field(offer.get("lowPrice")),
            decimal_field(offer.get("price")),
        );
        draft.price = prices.price;
        draft.promo_price = prices.promo_price;
    } else {
        tracing::warn!(url = %page.url(), "structured product has no offers");
    }

    let rating = product.get("aggregateRating");
    draft.rating = rating.and_then(|r| decimal_field(r.get("ratingValue")));
    draft.reviews_count = rating
        .and_then(|r| count_field(r.get("reviewCount")))
        .or_else(|| resolve_reviews_count(page));

    draft.category_path = breadcrumb(&blocks);
    if draft.category_path.is_empty() {
        draft.category_path = dom::breadcrumb(page);
    }

    Some(draft)
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
