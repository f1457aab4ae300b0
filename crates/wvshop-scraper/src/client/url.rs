//! Data endpoint URL construction.

use reqwest::Url;
use wvshop_core::{Currency, Locale};

use crate::error::ShopError;

/// Parameters of one data endpoint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleRequest {
    pub sale_id: i64,
    pub artist_id: i64,
    pub locale: Locale,
    pub currency: Currency,
}

/// Builds the Next.js data URL for a sale page:
///
/// `{base}/_next/data/{build_id}/{locale}/shop/{currency}/artists/{artist_id}/sales/{sale_id}.json`
/// `?shopAndCurrency={currency}&artistId={artist_id}&saleId={sale_id}`
///
/// Any query or fragment on `base_url` is dropped. Query parameters are always
/// emitted in the order above.
///
/// # Errors
///
/// Returns [`ShopError::InvalidBaseUrl`] if `base_url` cannot carry a path
/// (e.g. `mailto:` or `data:` URLs).
pub fn sale_data_url(
    base_url: &Url,
    build_id: &str,
    request: &SaleRequest,
) -> Result<Url, ShopError> {
    let locale = request.locale.as_str();
    let currency = request.currency.as_str();
    let artist_id = request.artist_id.to_string();
    let sale_id = request.sale_id.to_string();
    let file = format!("{sale_id}.json");

    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|()| ShopError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend([
            "_next",
            "data",
            build_id,
            locale,
            "shop",
            currency,
            "artists",
            artist_id.as_str(),
            "sales",
            file.as_str(),
        ]);

    url.query_pairs_mut()
        .append_pair("shopAndCurrency", currency)
        .append_pair("artistId", &artist_id)
        .append_pair("saleId", &sale_id);

    Ok(url)
}
