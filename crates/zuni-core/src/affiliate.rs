use url::Url;

use crate::CoreError;

const PRODUCT_BASE: &str = "https://produto.mercadolivre.com.br/";
const AFFILIATE_PARAM: &str = "matt_tool";

/// Build a tracked marketplace link from a product URL or a bare item id.
///
/// Inputs starting with `http://` or `https://` are used as-is; anything
/// else is treated as an item id (e.g. `MLB123456789`) and appended to the
/// marketplace product host. The `matt_tool` query parameter is set to
/// `code`, replacing any value already present. Other parameters are kept.
///
/// # Errors
///
/// Returns [`CoreError::EmptyAffiliateInput`] for blank input and
/// [`CoreError::InvalidAffiliateInput`] when the URL cannot be parsed.
pub fn build_affiliate_url(item_or_url: &str, code: &str) -> Result<String, CoreError> {
    let trimmed = item_or_url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyAffiliateInput);
    }

    let invalid = |reason: String| CoreError::InvalidAffiliateInput {
        input: trimmed.to_string(),
        reason,
    };

    let mut url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?
    } else {
        let mut url = Url::parse(PRODUCT_BASE).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(trimmed);
        url
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != AFFILIATE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(AFFILIATE_PARAM, code);

    Ok(url.to_string())
}
