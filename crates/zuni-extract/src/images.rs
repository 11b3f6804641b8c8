use std::collections::HashSet;

/// Host fragments of the marketplace's image CDN and storefront.
const MARKETPLACE_IMAGE_HOSTS: &[&str] = &["mlstatic.com", "mercadolivre"];

/// URL with its query string and fragment removed; two images with the
/// same key are the same picture at different sizes or cache-busters.
#[must_use]
pub fn dedup_key(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// `true` when `url` points at marketplace-hosted imagery.
#[must_use]
pub fn is_marketplace_image(url: &str) -> bool {
    MARKETPLACE_IMAGE_HOSTS.iter().any(|host| url.contains(host))
}

/// Ordered, deduplicated, capped list of image URLs.
#[derive(Debug)]
pub struct ImageList {
    urls: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl ImageList {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            urls: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    /// Add `url` unless it is a duplicate or the list is full.
    ///
    /// Returns `true` if the URL was added.
    pub fn push(&mut self, url: String) -> bool {
        if self.is_full() || !self.seen.insert(dedup_key(&url).to_owned()) {
            return false;
        }
        self.urls.push(url);
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.urls.len() >= self.cap
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Deduplicate by [`dedup_key`], keep first occurrences, and cap at `cap`.
#[must_use]
pub fn dedup_and_cap(urls: Vec<String>, cap: usize) -> Vec<String> {
    let mut list = ImageList::new(cap);
    for url in urls {
        if list.is_full() {
            break;
        }
        list.push(url);
    }
    list.into_vec()
}
