//! Locates and validates the sale query inside a Next.js data response.
//!
//! The data endpoint returns the page's react-query cache:
//!
//! ```text
//! { "pageProps": { "$dehydratedState": { "queries": [
//!     { "queryKey": ["GET:/api/v1/sales/:saleId", ...], "state": { "data": { ... } } },
//!     ...
//! ] } } }
//! ```
//!
//! Only the query whose first key element is [`SALE_QUERY_KEY`] is of interest.

use serde_json::Value;

use crate::error::{truncate, ShopError, ValidationIssue, MAX_BODY_CHARS};
use crate::schema::validate_sale;
use crate::types::SaleRecord;

/// Operation key of the sale-detail query in the dehydrated state.
pub const SALE_QUERY_KEY: &str = "GET:/api/v1/sales/:saleId";

/// Decodes a raw response body as JSON.
///
/// # Errors
///
/// Returns [`ShopError::InvalidStructure`] if the body is not JSON (e.g. an
/// HTML error page served with a 200).
pub fn decode_body(body: &str) -> Result<Value, ShopError> {
    serde_json::from_str(body).map_err(|e| ShopError::InvalidStructure {
        reason: format!(
            "response body is not JSON ({e}); body: {}",
            truncate(body, MAX_BODY_CHARS)
        ),
    })
}

/// Extracts and validates the sale record from a decoded data response.
///
/// # Errors
///
/// - [`ShopError::InvalidStructure`] if `pageProps.$dehydratedState.queries`
///   is missing or not an array.
/// - [`ShopError::SaleNotFound`] if no query carries [`SALE_QUERY_KEY`];
///   `available_keys` lists every query key present, in response order.
/// - [`ShopError::Validation`] if the sale payload violates the schema; every
///   violation is listed.
pub fn extract_sale(raw: &Value, sale_id: i64) -> Result<SaleRecord, ShopError> {
    let queries = dehydrated_queries(raw).ok_or_else(|| ShopError::InvalidStructure {
        reason: "expected pageProps.$dehydratedState.queries array; the data endpoint format may have changed"
            .to_string(),
    })?;

    let Some(query) = find_sale_query(queries) else {
        return Err(ShopError::SaleNotFound {
            sale_id,
            available_keys: queries.iter().map(query_key_label).collect(),
        });
    };

    let payload = query
        .pointer("/state/data")
        .cloned()
        .unwrap_or(Value::Null);

    let issues = validate_sale(&payload);
    if !issues.is_empty() {
        return Err(ShopError::Validation {
            issues,
            raw: payload,
        });
    }

    // The schema and the serde types are kept in lockstep; this only fails if
    // they drift apart.
    serde_json::from_value::<SaleRecord>(payload.clone()).map_err(|e| ShopError::Validation {
        issues: vec![ValidationIssue {
            path: String::new(),
            message: e.to_string(),
        }],
        raw: payload,
    })
}

/// Reads `labelArtistInfo.labelArtistId` from the sale query without
/// validating the rest of the payload.
///
/// Returns `None` on any structural mismatch; used only to correct a guessed
/// artist ID, never to build the primary result.
#[must_use]
pub fn extract_artist_id(raw: &Value) -> Option<i64> {
    let queries = dehydrated_queries(raw)?;
    find_sale_query(queries)?
        .pointer("/state/data/labelArtistInfo/labelArtistId")?
        .as_i64()
}

fn dehydrated_queries(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("pageProps")?
        .get("$dehydratedState")?
        .get("queries")?
        .as_array()
}

fn find_sale_query(queries: &[Value]) -> Option<&Value> {
    queries.iter().find(|q| {
        q.get("queryKey")
            .and_then(Value::as_array)
            .and_then(|key| key.first())
            .and_then(Value::as_str)
            == Some(SALE_QUERY_KEY)
    })
}

fn query_key_label(query: &Value) -> String {
    match query
        .get("queryKey")
        .and_then(Value::as_array)
        .map(|key| key.first())
    {
        Some(Some(Value::String(s))) => s.clone(),
        Some(Some(other)) => other.to_string(),
        Some(None) => "undefined".to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
