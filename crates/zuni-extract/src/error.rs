use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not obtain a document for {url}: {reason}")]
    ExtractionUnavailable { url: String, reason: String },

    #[error("unable to read this page: no product data found at {url}")]
    NoDataExtracted { url: String },

    #[error("could not determine a price for this product")]
    MissingPrice,

    #[error("import rejected (HTTP {status}): {message}")]
    SubmissionRejected { status: u16, message: String },

    #[error("invalid affiliate URL \"{url}\": {reason}")]
    InvalidAffiliateUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    pub(crate) fn unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExtractionUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
