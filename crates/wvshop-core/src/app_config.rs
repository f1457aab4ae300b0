use std::path::PathBuf;

use crate::market::{Currency, Locale};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Storefront origin, e.g. `https://shop.weverse.io`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub build_id_ttl_secs: u64,
    /// When set, the build ID survives restarts in this JSON file.
    pub build_id_cache_path: Option<PathBuf>,
    pub default_locale: Locale,
    pub default_currency: Currency,
}
