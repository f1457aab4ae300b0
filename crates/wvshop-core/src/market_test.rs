use super::*;

#[test]
fn locale_wire_spelling_is_preserved() {
    let rendered: Vec<String> = Locale::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["en", "ko", "ja", "zh-CN", "zh-tw", "es"]);
}

#[test]
fn locale_parses_case_insensitively() {
    assert_eq!(
        "zh-cn".parse::<Locale>().unwrap(),
        Locale::SimplifiedChinese
    );
    assert_eq!(
        "ZH-TW".parse::<Locale>().unwrap(),
        Locale::TraditionalChinese
    );
    assert_eq!(" ko ".parse::<Locale>().unwrap(), Locale::Korean);
}

#[test]
fn locale_rejects_unknown_value() {
    let err = "fr".parse::<Locale>().unwrap_err();
    assert!(
        matches!(err, CoreError::UnsupportedLocale(ref v) if v == "fr"),
        "expected UnsupportedLocale(fr), got: {err:?}"
    );
}

#[test]
fn locale_serde_uses_wire_spelling() {
    let json = serde_json::to_string(&Locale::TraditionalChinese).unwrap();
    assert_eq!(json, "\"zh-tw\"");
    let back: Locale = serde_json::from_str("\"zh-CN\"").unwrap();
    assert_eq!(back, Locale::SimplifiedChinese);
}

#[test]
fn defaults_are_english_and_usd() {
    assert_eq!(Locale::default(), Locale::English);
    assert_eq!(Currency::default(), Currency::Usd);
}

#[test]
fn currency_parses_lowercase_codes() {
    assert_eq!("krw".parse::<Currency>().unwrap(), Currency::Krw);
    assert_eq!("MXN".parse::<Currency>().unwrap(), Currency::Mxn);
}

#[test]
fn currency_rejects_unknown_code() {
    let err = "EUR".parse::<Currency>().unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedCurrency(ref v) if v == "EUR"));
}

#[test]
fn currency_serde_is_uppercase() {
    assert_eq!(serde_json::to_string(&Currency::Jpy).unwrap(), "\"JPY\"");
}

#[test]
fn currency_symbols() {
    assert_eq!(Currency::Usd.symbol(), "$");
    assert_eq!(Currency::Mxn.symbol(), "MXN $");
    assert_eq!(Currency::Krw.symbol(), "KRW ");
}
