use super::*;

use wvshop_core::{AppConfig, Environment};
use wvshop_scraper::SaleRecord;

use crate::format::{format_price, format_sale};
use crate::sale::{sale_options, target_sale_id};

const FIXTURE: &str = include_str!("../../wvshop-scraper/tests/fixtures/sale_43782.json");

fn fixture_sale() -> SaleRecord {
    let raw: serde_json::Value = serde_json::from_str(FIXTURE).expect("fixture is valid JSON");
    wvshop_scraper::extract_sale(&raw, 43782).expect("fixture should validate")
}

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        base_url: "https://shop.weverse.io".to_string(),
        request_timeout_secs: 30,
        user_agent: "wvshop-test".to_string(),
        build_id_ttl_secs: 3600,
        build_id_cache_path: None,
        default_locale: Locale::Korean,
        default_currency: Currency::Krw,
    }
}

fn sale_args(argv: &[&str]) -> SaleArgs {
    let cli = Cli::try_parse_from(argv).expect("expected valid cli args");
    match cli.command {
        Commands::Sale(args) => args,
        other => panic!("expected sale command, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

#[test]
fn parses_sale_with_id_and_market() {
    let args = sale_args(&[
        "wvshop-cli", "sale", "--sale-id", "43782", "--locale", "zh-tw", "--currency", "KRW",
    ]);
    assert_eq!(args.sale_id, Some(43782));
    assert_eq!(args.locale, Some(Locale::TraditionalChinese));
    assert_eq!(args.currency, Some(Currency::Krw));
    assert_eq!(args.artist_id, None);
    assert!(!args.json);
    assert!(!args.refresh_cache);
}

#[test]
fn parses_short_flags() {
    let args = sale_args(&[
        "wvshop-cli", "sale", "-s", "1", "-a", "3", "-l", "ja", "-c", "jpy", "--json",
    ]);
    assert_eq!(args.sale_id, Some(1));
    assert_eq!(args.artist_id, Some(3));
    assert_eq!(args.locale, Some(Locale::Japanese));
    assert_eq!(args.currency, Some(Currency::Jpy));
    assert!(args.json);
}

#[test]
fn parses_sale_by_url() {
    let args = sale_args(&[
        "wvshop-cli",
        "sale",
        "--url",
        "https://shop.weverse.io/en/shop/USD/artists/3/sales/43782",
        "--refresh-cache",
    ]);
    assert_eq!(args.sale_id, None);
    assert!(args.refresh_cache);
    assert_eq!(target_sale_id(&args).unwrap(), 43782);
}

#[test]
fn sale_requires_id_or_url() {
    assert!(Cli::try_parse_from(["wvshop-cli", "sale"]).is_err());
}

#[test]
fn sale_rejects_both_id_and_url() {
    let result = Cli::try_parse_from([
        "wvshop-cli",
        "sale",
        "--sale-id",
        "1",
        "--url",
        "https://shop.weverse.io/en/shop/USD/artists/3/sales/1",
    ]);
    assert!(result.is_err());
}

#[test]
fn sale_rejects_unknown_locale_and_currency() {
    assert!(Cli::try_parse_from(["wvshop-cli", "sale", "-s", "1", "--locale", "fr"]).is_err());
    assert!(Cli::try_parse_from(["wvshop-cli", "sale", "-s", "1", "--currency", "EUR"]).is_err());
}

#[test]
fn sale_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["wvshop-cli", "sale", "--sale-id", "abc"]).is_err());
}

#[test]
fn parses_build_id_command() {
    let cli = Cli::try_parse_from(["wvshop-cli", "build-id"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::BuildId { refresh: false }));

    let cli = Cli::try_parse_from(["wvshop-cli", "build-id", "--refresh"]).unwrap();
    assert!(matches!(cli.command, Commands::BuildId { refresh: true }));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["wvshop-cli"]).is_err());
}

// ---------------------------------------------------------------------------
// Option resolution
// ---------------------------------------------------------------------------

#[test]
fn url_without_sale_id_is_an_error() {
    let args = sale_args(&["wvshop-cli", "sale", "--url", "https://shop.weverse.io/en/home"]);
    let err = target_sale_id(&args).unwrap_err();
    assert!(err.to_string().contains("could not find a sale ID"));
}

#[test]
fn sale_options_fall_back_to_config_defaults() {
    let args = sale_args(&["wvshop-cli", "sale", "-s", "1"]);
    let options = sale_options(&args, &test_config());
    assert_eq!(options.artist_id, None);
    assert_eq!(options.locale, Locale::Korean);
    assert_eq!(options.currency, Currency::Krw);
}

#[test]
fn sale_options_prefer_flags_over_config() {
    let args = sale_args(&["wvshop-cli", "sale", "-s", "1", "-a", "3", "-l", "es", "-c", "MXN"]);
    let options = sale_options(&args, &test_config());
    assert_eq!(options.artist_id, Some(3));
    assert_eq!(options.locale, Locale::Spanish);
    assert_eq!(options.currency, Currency::Mxn);
}

#[test]
fn configured_cache_path_is_kept() {
    let configured = PathBuf::from("/tmp/custom/buildid.json");
    assert_eq!(
        with_default_cache_path(Some(configured.clone())),
        Some(configured)
    );
}

#[test]
fn missing_cache_path_defaults_to_platform_cache_dir() {
    let path = with_default_cache_path(None);
    assert_eq!(
        path,
        dirs::cache_dir().map(|dir| dir.join("wvshop").join("buildid.json"))
    );
    if let Some(path) = path {
        assert!(path.ends_with("wvshop/buildid.json"));
    }
}

#[test]
fn env_file_loading_is_left_to_core() {
    let manifest = include_str!("../Cargo.toml");
    assert!(!manifest.contains("dotenvy"));
    assert!(manifest.contains("tracing.workspace = true"));
}

// ---------------------------------------------------------------------------
// Output formatting
// ---------------------------------------------------------------------------

#[test]
fn format_price_groups_thousands() {
    assert_eq!(format_price(45000.0, Currency::Krw), "KRW 45,000");
    assert_eq!(format_price(1_234_567.0, Currency::Jpy), "JPY 1,234,567");
    assert_eq!(format_price(999.0, Currency::Usd), "$999");
}

#[test]
fn format_price_keeps_cents() {
    assert_eq!(format_price(19.99, Currency::Usd), "$19.99");
    assert_eq!(format_price(1250.5, Currency::Mxn), "MXN $1,250.5");
    assert_eq!(format_price(0.0, Currency::Cny), "CNY 0");
}

#[test]
fn format_sale_renders_every_section() {
    let text = format_sale(&fixture_sale(), Currency::Krw);

    assert!(text.contains("   ID:       43782"));
    assert!(text.contains("   Name:     [SEVENTEEN] LIGHT STICK VER.3"));
    assert!(text.contains("   Name:     SEVENTEEN (SVT)"));
    assert!(text.contains("   Price:    KRW 45,000"));
    assert!(text.contains("   Discount: 8% off (Original: KRW 49,000)"));
    assert!(text.contains("   Cash:     KRW 450 earned"));
    assert!(text.contains("   Options:  2 available (1 sold out) of 3 total"));
    assert!(text.contains("     - LIGHT STICK [In Stock] (KRW 45,000, max 2 per order)"));
    assert!(text.contains("     - LIGHT STICK + POUCH [SOLD OUT] (KRW 54,000)"));
    assert!(text.contains("   - Limit 2 per order"));
    assert!(text.contains("   Thumbnails: 2"));
    assert!(text.contains("   Details:    1"));
}

#[test]
fn format_sale_omits_discount_when_zero() {
    let mut sale = fixture_sale();
    sale.price.discount_percent = 0.0;
    let text = format_sale(&sale, Currency::Krw);
    assert!(!text.contains("Discount:"));
}

#[test]
fn format_sale_without_options() {
    let mut sale = fixture_sale();
    sale.option.options.clear();
    let text = format_sale(&sale, Currency::Usd);
    assert!(text.contains("   Options:  None"));
}
