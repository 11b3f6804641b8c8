use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let import_base_url = lookup("ZUNI_IMPORT_BASE_URL").ok();
    let import_token = lookup("ZUNI_IMPORT_TOKEN").ok();

    let marketplace_domain = or_default("ZUNI_MARKETPLACE_DOMAIN", "mercadolivre.com.br")
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase();
    if marketplace_domain.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ZUNI_MARKETPLACE_DOMAIN".to_string(),
            reason: "domain must be non-empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("ZUNI_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ZUNI_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default("ZUNI_USER_AGENT", "zuni-importer/0.1 (catalog-import)");
    let log_level = or_default("ZUNI_LOG_LEVEL", "info");
    let categories_path = PathBuf::from(or_default(
        "ZUNI_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let affiliate_code = or_default("ZUNI_AFFILIATE_CODE", "40141155");

    Ok(AppConfig {
        import_base_url,
        import_token,
        marketplace_domain,
        request_timeout_secs,
        user_agent,
        log_level,
        categories_path,
        affiliate_code,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
