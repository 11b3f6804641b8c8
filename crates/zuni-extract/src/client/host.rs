//! Marketplace host checks for product URLs.

use reqwest::Url;

use crate::error::ExtractError;

/// Returns `true` when `host` is `domain` or one of its subdomains.
///
/// The suffix must start at a label boundary, so `mercadolivre.com.br` does
/// not match `fakemercadolivre.com.br`.
#[must_use]
pub fn host_matches(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return false;
    }
    host == domain
        || host
            .strip_suffix(domain.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Parses `raw` and checks it points at the marketplace `domain`.
///
/// # Errors
///
/// Returns [`ExtractError::ExtractionUnavailable`] when `raw` is not an
/// absolute `http(s)` URL or its host is outside `domain`.
pub fn validate_product_url(raw: &str, domain: &str) -> Result<Url, ExtractError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| ExtractError::unavailable(trimmed, format!("not a valid URL: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExtractError::unavailable(
            trimmed,
            format!("unsupported scheme \"{}\"", url.scheme()),
        ));
    }

    let Some(host) = url.host_str() else {
        return Err(ExtractError::unavailable(trimmed, "URL has no host"));
    };
    if !host_matches(host, domain) {
        tracing::warn!(url = trimmed, host, domain, "rejected non-marketplace URL");
        return Err(ExtractError::unavailable(
            trimmed,
            format!("host \"{host}\" is not a {domain} page"),
        ));
    }

    Ok(url)
}
