pub mod app_config;
pub mod config;
pub mod market;
pub mod sale;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use market::{Currency, Locale};
pub use sale::{sale_id_from_url, StockStatus};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported locale '{0}' (expected one of: en, ko, ja, zh-CN, zh-tw, es)")]
    UnsupportedLocale(String),

    #[error("unsupported currency '{0}' (expected one of: USD, KRW, JPY, CNY, MXN)")]
    UnsupportedCurrency(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
