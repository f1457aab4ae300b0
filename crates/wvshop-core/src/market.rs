use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Storefront display language. Appears as a path segment in the data
/// endpoint, so the wire spelling (including the mixed-case `zh-CN` and
/// lowercase `zh-tw`) must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
    #[serde(rename = "zh-tw")]
    TraditionalChinese,
    #[serde(rename = "es")]
    Spanish,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::English,
        Locale::Korean,
        Locale::Japanese,
        Locale::SimplifiedChinese,
        Locale::TraditionalChinese,
        Locale::Spanish,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Korean => "ko",
            Locale::Japanese => "ja",
            Locale::SimplifiedChinese => "zh-CN",
            Locale::TraditionalChinese => "zh-tw",
            Locale::Spanish => "es",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    /// Matches the wire spelling case-insensitively, so `zh-cn` and `ZH-TW`
    /// are accepted from the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnsupportedLocale(s.to_string()))
    }
}

/// Shop currency. The storefront runs a separate shop per currency, which is
/// why the same code appears in both the path and the `shopAndCurrency` query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Krw,
    Jpy,
    Cny,
    Mxn,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Krw,
        Currency::Jpy,
        Currency::Cny,
        Currency::Mxn,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Krw => "KRW",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Mxn => "MXN",
        }
    }

    /// Display prefix used when rendering prices for humans.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Krw => "KRW ",
            Currency::Jpy => "JPY ",
            Currency::Cny => "CNY ",
            Currency::Mxn => "MXN $",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnsupportedCurrency(s.to_string()))
    }
}

#[cfg(test)]
#[path = "market_test.rs"]
mod tests;
