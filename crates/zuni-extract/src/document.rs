//! Read-only view of one marketplace page.
//!
//! Extractors only need three things from a page: find elements by CSS
//! selector, read their text, and read their attributes. [`Page`] and
//! [`Node`] expose exactly that over a parsed `scraper::Html`, plus an
//! approximation of the text a browser would render for `<body>`.

use std::cell::OnceCell;
use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Elements whose text never reaches the rendered page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line in rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// A parsed page and the URL it was read from.
pub struct Page {
    html: Html,
    source: String,
    url: Url,
    rendered: OnceCell<String>,
}

impl Page {
    #[must_use]
    pub fn parse(source: impl Into<String>, url: Url) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Self {
            html,
            source,
            url,
            rendered: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The raw markup, including script bodies.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` when the markup has nothing an extractor could read.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }

    #[must_use]
    pub fn select_first(&self, selector: &Selector) -> Option<Node<'_>> {
        self.html.select(selector).next().map(Node)
    }

    pub fn select_all<'s>(&'s self, selector: &'s Selector) -> impl Iterator<Item = Node<'s>> + 's {
        self.html.select(selector).map(Node)
    }

    /// Approximate rendered text of `<body>`.
    ///
    /// Text inside hidden elements is skipped, block elements become line
    /// breaks, and runs of whitespace collapse to one space. Computed once
    /// per page.
    pub fn rendered_text(&self) -> &str {
        self.rendered.get_or_init(|| {
            let body = self
                .html
                .select(&BODY_SELECTOR)
                .next()
                .unwrap_or_else(|| self.html.root_element());
            render_text(body)
        })
    }

    /// The first `max_chars` characters of [`Page::rendered_text`].
    pub fn text_window(&self, max_chars: usize) -> &str {
        let text = self.rendered_text();
        match text.char_indices().nth(max_chars) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    /// Resolve `raw` against the page URL.
    ///
    /// Returns `None` for blanks, inline `data:` payloads, and anything
    /// that does not end up as an `http`/`https` URL.
    #[must_use]
    pub fn resolve_url(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with("data:") {
            return None;
        }
        let resolved = self.url.join(raw).ok()?;
        matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
    }
}

/// One element of a [`Page`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    #[must_use]
    pub fn select_first(&self, selector: &Selector) -> Option<Node<'a>> {
        self.0.select(selector).next().map(Node)
    }

    pub fn select_all<'s>(&self, selector: &'s Selector) -> impl Iterator<Item = Node<'a>> + 's
    where
        'a: 's,
    {
        self.0.select(selector).map(Node)
    }

    /// Text content with whitespace collapsed, like `textContent` after a
    /// `\s+` → `" "` pass.
    #[must_use]
    pub fn text(&self) -> String {
        normalize_whitespace(&self.0.text().collect::<String>())
    }

    /// Concatenated descendant text exactly as written in the markup.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.0.text().collect()
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Attribute value, trimmed, or `None` when absent or blank.
    #[must_use]
    pub fn non_blank_attr(&self, name: &str) -> Option<&'a str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn tag_name(&self) -> &'a str {
        self.0.value().name()
    }
}

/// Collapse every whitespace run to one space and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

enum Step<'a> {
    Enter(ElementRef<'a>),
    Leave { block: bool },
    Text(&'a str),
}

fn render_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => raw.push_str(text),
            Step::Leave { block } => {
                if block {
                    raw.push('\n');
                }
            }
            Step::Enter(element) => {
                let name = element.value().name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    raw.push('\n');
                }
                stack.push(Step::Leave { block });

                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    match child.value() {
                        scraper::Node::Text(text) => stack.push(Step::Text(&**text)),
                        scraper::Node::Element(_) => {
                            if let Some(child) = ElementRef::wrap(child) {
                                stack.push(Step::Enter(child));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    raw.lines()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
