use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub import_base_url: Option<String>,
    pub import_token: Option<String>,
    pub marketplace_domain: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub categories_path: PathBuf,
    pub affiliate_code: String,
}

/// Where and how to submit extracted products.
///
/// Passed explicitly to the import client; nothing in the extraction crate
/// reads the environment.
#[derive(Clone)]
pub struct ImportTarget {
    pub base_url: String,
    pub token: String,
}

impl AppConfig {
    /// Returns the submission target, or the first missing variable.
    ///
    /// Extraction alone never needs these, so they are only required here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming `ZUNI_IMPORT_BASE_URL` or
    /// `ZUNI_IMPORT_TOKEN` when unset or blank.
    pub fn import_target(&self) -> Result<ImportTarget, ConfigError> {
        let base_url = non_blank(self.import_base_url.as_deref())
            .ok_or_else(|| ConfigError::MissingEnvVar("ZUNI_IMPORT_BASE_URL".to_string()))?;
        let token = non_blank(self.import_token.as_deref())
            .ok_or_else(|| ConfigError::MissingEnvVar("ZUNI_IMPORT_TOKEN".to_string()))?;
        Ok(ImportTarget {
            base_url: base_url.to_string(),
            token: token.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("import_base_url", &self.import_base_url)
            .field(
                "import_token",
                &self.import_token.as_ref().map(|_| "[redacted]"),
            )
            .field("marketplace_domain", &self.marketplace_domain)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field("affiliate_code", &self.affiliate_code)
            .finish()
    }
}

impl std::fmt::Debug for ImportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportTarget")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish()
    }
}
