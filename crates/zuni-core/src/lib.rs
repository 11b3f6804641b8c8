pub mod affiliate;
pub mod app_config;
pub mod categories;
pub mod config;
pub mod draft;
pub mod payload;

pub use affiliate::build_affiliate_url;
pub use app_config::{AppConfig, ImportTarget};
pub use categories::{
    load_category_seeds, normalize_label, pick_closest_seed, place_category, slugify,
    CategoryPlacement, CategorySeedsFile, SeedCategory, SubCategory,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft::{ExtractionDraft, ExtractionMethod};
pub use payload::{ImportPayload, ImportReceipt};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read category seeds file {path}: {source}")]
    SeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse category seeds file: {0}")]
    SeedsFileParse(#[from] serde_yaml::Error),

    #[error("category seeds validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("affiliate input is empty")]
    EmptyAffiliateInput,

    #[error("invalid affiliate input \"{input}\": {reason}")]
    InvalidAffiliateInput { input: String, reason: String },
}
