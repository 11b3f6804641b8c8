use std::sync::LazyLock;

use scraper::Selector;

use crate::document::{Node, Page};
use crate::images::{is_marketplace_image, ImageList};
use crate::pipeline::ExtractionLimits;

static FIGURE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ui-pdp-gallery__figure").expect("valid selector"));
static GALLERY_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ui-pdp-gallery img").expect("valid selector"));
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));

/// Attributes holding an image URL, eager first then lazy-load.
const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-lazy", "data-zoom"];

/// Gallery images in three tiers, first non-empty tier wins:
///
/// 1. one image per gallery figure;
/// 2. every image inside the gallery container;
/// 3. every image on the page hosted on the marketplace CDN.
///
/// All tiers resolve relative URLs, skip inline `data:` images, and share
/// the same dedup and cap.
#[must_use]
pub fn gallery_images(page: &Page, limits: &ExtractionLimits) -> Vec<String> {
    let figures = collect(
        page,
        limits,
        page.select_all(&FIGURE)
            .filter_map(|figure| figure.select_first(&IMAGE)),
        true,
    );
    if !figures.is_empty() {
        return figures.into_vec();
    }

    let gallery = collect(page, limits, page.select_all(&GALLERY_IMAGE), false);
    if !gallery.is_empty() {
        return gallery.into_vec();
    }

    let mut fallback = ImageList::new(limits.max_images);
    for img in page.select_all(&IMAGE) {
        if fallback.is_full() {
            break;
        }
        if let Some(url) = image_source(page, img, false).filter(|u| is_marketplace_image(u)) {
            fallback.push(url);
        }
    }
    fallback.into_vec()
}

fn collect<'p>(
    page: &'p Page,
    limits: &ExtractionLimits,
    images: impl Iterator<Item = Node<'p>>,
    use_srcset: bool,
) -> ImageList {
    let mut list = ImageList::new(limits.max_images);
    for img in images {
        if list.is_full() {
            break;
        }
        if let Some(url) = image_source(page, img, use_srcset) {
            list.push(url);
        }
    }
    list
}

/// First usable source of an `<img>`, resolved against the page.
fn image_source(page: &Page, img: Node<'_>, use_srcset: bool) -> Option<String> {
    SOURCE_ATTRS
        .iter()
        .filter_map(|attr| img.non_blank_attr(attr))
        .find_map(|raw| page.resolve_url(raw))
        .or_else(|| {
            if !use_srcset {
                return None;
            }
            img.non_blank_attr("srcset")
                .and_then(first_srcset_candidate)
                .and_then(|raw| page.resolve_url(raw))
        })
}

/// URL of the first candidate in a `srcset` list.
fn first_srcset_candidate(srcset: &str) -> Option<&str> {
    srcset.split(',').next()?.split_whitespace().next()
}
