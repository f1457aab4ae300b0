use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "WVSHOP_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url, "https://shop.weverse.io");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.build_id_ttl_secs, 3600);
    assert!(cfg.build_id_cache_path.is_none());
    assert_eq!(cfg.default_locale, Locale::English);
    assert_eq!(cfg.default_currency, Currency::Usd);
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_BASE_URL", "http://localhost:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8080");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_BASE_URL", "shop.weverse.io");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WVSHOP_BASE_URL"),
        "expected InvalidEnvVar(WVSHOP_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WVSHOP_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(WVSHOP_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_app_config_build_id_ttl_override() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_BUILD_ID_TTL_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.build_id_ttl_secs, 60);
}

#[test]
fn build_app_config_cache_path_set() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_BUILD_ID_CACHE_PATH", "/tmp/wvshop/buildid.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.build_id_cache_path,
        Some(PathBuf::from("/tmp/wvshop/buildid.json"))
    );
}

#[test]
fn build_app_config_blank_cache_path_is_none() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_BUILD_ID_CACHE_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.build_id_cache_path.is_none());
}

#[test]
fn build_app_config_locale_and_currency_override() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_DEFAULT_LOCALE", "zh-tw");
    map.insert("WVSHOP_DEFAULT_CURRENCY", "krw");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_locale, Locale::TraditionalChinese);
    assert_eq!(cfg.default_currency, Currency::Krw);
}

#[test]
fn build_app_config_unknown_currency_rejected() {
    let mut map = HashMap::new();
    map.insert("WVSHOP_DEFAULT_CURRENCY", "EUR");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WVSHOP_DEFAULT_CURRENCY"),
        "expected InvalidEnvVar(WVSHOP_DEFAULT_CURRENCY), got: {result:?}"
    );
}

#[test]
fn debug_output_lists_every_field() {
    let map: HashMap<&str, &str> = HashMap::from([("WVSHOP_BUILD_ID_CACHE_PATH", "/tmp/wvshop.json")]);
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.starts_with("AppConfig {"), "got: {debug}");
    assert!(debug.contains("https://shop.weverse.io"));
    assert!(debug.contains("build_id_cache_path: Some(\"/tmp/wvshop.json\")"));
    assert!(debug.contains("default_currency: Usd"));
}
