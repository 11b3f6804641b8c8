//! Product extraction for marketplace pages and hand-off to the catalog.

pub mod client;
pub mod document;
pub mod dom;
pub mod error;
pub mod images;
pub mod money;
pub mod pattern;
pub mod pipeline;
pub mod price;
pub mod reviews;
pub mod structured;
pub mod submit;

pub use client::{validate_product_url, MarketplaceClient};
pub use document::Page;
pub use error::ExtractError;
pub use pipeline::{extract_html, extract_page, ExtractionLimits};
pub use submit::{build_payload, ImportClient};
