use crate::app_config::{AppConfig, Environment};
use crate::market::{Currency, Locale};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://shop.weverse.io";
pub const DEFAULT_USER_AGENT: &str = "wvshop/0.1 (sale-watcher)";
/// Next.js rotates the build ID on deploy; an hour keeps entry-page fetches rare
/// while the 404 refresh path covers deploys inside the window.
pub const DEFAULT_BUILD_ID_TTL_SECS: u64 = 3600;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("WVSHOP_ENV", "development"))?;
    let log_level = or_default("WVSHOP_LOG_LEVEL", "info");

    let base_url = or_default("WVSHOP_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "WVSHOP_BASE_URL",
            format!("expected an http(s) URL, got '{base_url}'"),
        ));
    }

    let request_timeout_secs = parse_u64("WVSHOP_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "WVSHOP_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("WVSHOP_USER_AGENT", DEFAULT_USER_AGENT);
    let build_id_ttl_secs = parse_u64(
        "WVSHOP_BUILD_ID_TTL_SECS",
        &DEFAULT_BUILD_ID_TTL_SECS.to_string(),
    )?;
    let build_id_cache_path = lookup("WVSHOP_BUILD_ID_CACHE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let default_locale = or_default("WVSHOP_DEFAULT_LOCALE", "en")
        .parse::<Locale>()
        .map_err(|e| invalid("WVSHOP_DEFAULT_LOCALE", e.to_string()))?;
    let default_currency = or_default("WVSHOP_DEFAULT_CURRENCY", "USD")
        .parse::<Currency>()
        .map_err(|e| invalid("WVSHOP_DEFAULT_CURRENCY", e.to_string()))?;

    Ok(AppConfig {
        env,
        log_level,
        base_url,
        request_timeout_secs,
        user_agent,
        build_id_ttl_secs,
        build_id_cache_path,
        default_locale,
        default_currency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WVSHOP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
