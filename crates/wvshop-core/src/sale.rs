use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SALE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://.*(?:sale|sales)/(\d+)$").expect("valid sale url regex"));

/// Stock state of a single purchasable option.
///
/// Watchers persist this per option and notify when it flips between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    SoldOut,
}

impl StockStatus {
    #[must_use]
    pub fn from_sold_out(is_sold_out: bool) -> Self {
        if is_sold_out {
            StockStatus::SoldOut
        } else {
            StockStatus::InStock
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, StockStatus::InStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "in stock"),
            StockStatus::SoldOut => write!(f, "sold out"),
        }
    }
}

/// Extract the numeric sale ID from a storefront product link.
///
/// Accepts both `/sale/<id>` and `/sales/<id>` forms, e.g.
/// `"https://shop.weverse.io/en/shop/USD/artists/2/sales/43782"` → `Some(43782)`.
/// The ID must be the final path segment; links with a query string or
/// trailing slash are rejected.
#[must_use]
pub fn sale_id_from_url(url: &str) -> Option<i64> {
    SALE_URL_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
