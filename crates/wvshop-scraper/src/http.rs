//! Shared GET helper that maps transport failures and non-2xx statuses onto
//! [`ShopError::Fetch`].

use reqwest::{Client, Url};

use crate::error::ShopError;

/// Issues a GET and returns the body of a 2xx response.
///
/// The body is read for error responses too, so the truncated text ends up in
/// the error for diagnosis.
pub(crate) async fn get_text(client: &Client, url: &Url, accept: &str) -> Result<String, ShopError> {
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, accept)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|e| ShopError::transport(url.as_str(), &e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ShopError::transport(url.as_str(), &e))?;

    if !status.is_success() {
        tracing::debug!(url = %url, status = status.as_u16(), "non-success response");
        return Err(ShopError::http_status(status.as_u16(), url.as_str(), &body));
    }

    Ok(body)
}
