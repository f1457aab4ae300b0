//! HTTP client for the storefront's Next.js sale data endpoint.

mod url;

use std::time::Duration;

use chrono::TimeDelta;
use reqwest::{Client, Url};
use serde_json::Value;
use wvshop_core::config::DEFAULT_BASE_URL;
use wvshop_core::{AppConfig, Currency, Locale};

use crate::build_id::BuildIdResolver;
use crate::cache::{BuildIdCache, FileStore, MemoryStore, DEFAULT_TTL};
use crate::error::ShopError;
use crate::http::get_text;
use crate::parse::{decode_body, extract_artist_id, extract_sale};
use crate::types::SaleRecord;

pub use url::{sale_data_url, SaleRequest};

/// Artist ID used in the data URL when the caller does not know the real one.
///
/// The storefront serves the sale under any artist path, and the response
/// names the owning artist, so a guessed request is followed by at most one
/// corrective request.
pub const PLACEHOLDER_ARTIST_ID: i64 = 2;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-call options for [`ShopClient::get_sale`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleOptions {
    /// Owning artist, when known. `None` makes the client guess and correct.
    pub artist_id: Option<i64>,
    pub locale: Locale,
    pub currency: Currency,
}

impl SaleOptions {
    #[must_use]
    pub fn with_artist_id(mut self, artist_id: i64) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Client for Weverse Shop sale pages.
///
/// Resolves the storefront build ID on demand, fetches the sale's data
/// endpoint and validates the result. A 404 from the data endpoint is treated
/// as a rotated build ID: the ID is refreshed once and the request retried
/// once. Any other non-2xx status is returned to the caller unchanged.
pub struct ShopClient {
    client: Client,
    base_url: Url,
    resolver: BuildIdResolver,
}

impl ShopClient {
    /// Creates a client for the public storefront with an in-memory build ID
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ShopError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            BuildIdCache::in_memory(),
        )
    }

    /// Creates a client pointed at `base_url` with the given cache. Used by
    /// tests against a mock server and by [`ShopClient::from_config`].
    ///
    /// # Errors
    ///
    /// - [`ShopError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ShopError::Client`] if the `reqwest::Client` cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        cache: BuildIdCache,
    ) -> Result<Self, ShopError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()?;
        let resolver = BuildIdResolver::new(client.clone(), &base_url, cache);
        Ok(Self {
            client,
            base_url,
            resolver,
        })
    }

    /// Creates a client from loaded application config. A configured cache
    /// path selects the file-backed store.
    ///
    /// # Errors
    ///
    /// Same as [`ShopClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ShopError> {
        let ttl = i64::try_from(config.build_id_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(DEFAULT_TTL);
        let cache = match &config.build_id_cache_path {
            Some(path) => BuildIdCache::new(Box::new(FileStore::new(path)), ttl),
            None => BuildIdCache::new(Box::<MemoryStore>::default(), ttl),
        };
        Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            cache,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn build_id_cache(&self) -> &BuildIdCache {
        self.resolver.cache()
    }

    /// Returns the storefront build ID, from cache unless `force_refresh`.
    ///
    /// # Errors
    ///
    /// See [`BuildIdResolver::resolve`].
    pub async fn resolve_build_id(&self, force_refresh: bool) -> Result<String, ShopError> {
        self.resolver.resolve(force_refresh).await
    }

    /// Fetches and validates one sale.
    ///
    /// # Errors
    ///
    /// - [`ShopError::Fetch`] if the build ID could not be fetched, the data
    ///   endpoint returned a non-2xx status (a 404 only after one refresh and
    ///   retry), or the request failed in transit.
    /// - [`ShopError::BuildIdExtraction`] if the entry page carried no build ID.
    /// - [`ShopError::InvalidStructure`] if the body is not JSON or lacks the
    ///   dehydrated query list.
    /// - [`ShopError::SaleNotFound`] if the response has no sale query.
    /// - [`ShopError::Validation`] if the sale payload failed validation.
    pub async fn get_sale(
        &self,
        sale_id: i64,
        options: &SaleOptions,
    ) -> Result<SaleRecord, ShopError> {
        let build_id = self.resolver.resolve(false).await?;

        match self.fetch_sale(&build_id, sale_id, options).await {
            Err(err) if err.is_not_found() => {
                tracing::warn!(
                    sale_id,
                    %build_id,
                    "data endpoint returned 404, refreshing build ID"
                );
                let build_id = self.resolver.resolve(true).await?;
                self.fetch_sale(&build_id, sale_id, options).await
            }
            result => result,
        }
    }

    /// One attempt at a sale under `build_id`, including the artist
    /// correction when the artist was guessed.
    async fn fetch_sale(
        &self,
        build_id: &str,
        sale_id: i64,
        options: &SaleOptions,
    ) -> Result<SaleRecord, ShopError> {
        let request = SaleRequest {
            sale_id,
            artist_id: options.artist_id.unwrap_or(PLACEHOLDER_ARTIST_ID),
            locale: options.locale,
            currency: options.currency,
        };
        let raw = self.fetch_sale_json(build_id, &request).await?;

        if options.artist_id.is_none() {
            if let Some(actual) = extract_artist_id(&raw).filter(|id| *id != request.artist_id) {
                tracing::info!(
                    sale_id,
                    guessed = request.artist_id,
                    actual,
                    "refetching sale under its owning artist"
                );
                let corrected = SaleRequest {
                    artist_id: actual,
                    ..request
                };
                match self.fetch_corrected_sale(build_id, &corrected).await {
                    Ok(sale) => return Ok(sale),
                    Err(err) => {
                        tracing::warn!(
                            sale_id,
                            artist_id = actual,
                            error = %err,
                            "artist correction failed, using guessed response"
                        );
                    }
                }
            }
        }

        extract_sale(&raw, sale_id)
    }

    /// The corrective request of the artist correction. Any failure here is
    /// swallowed by the caller in favour of the guessed response.
    async fn fetch_corrected_sale(
        &self,
        build_id: &str,
        request: &SaleRequest,
    ) -> Result<SaleRecord, ShopError> {
        let raw = self.fetch_sale_json(build_id, request).await?;
        extract_sale(&raw, request.sale_id)
    }

    async fn fetch_sale_json(
        &self,
        build_id: &str,
        request: &SaleRequest,
    ) -> Result<Value, ShopError> {
        let url = sale_data_url(&self.base_url, build_id, request)?;
        tracing::debug!(%url, "fetching sale data");
        let body = get_text(&self.client, &url, "application/json").await?;
        decode_body(&body)
    }
}

impl std::fmt::Debug for ShopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopClient")
            .field("base_url", &self.base_url.as_str())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Parses `base_url` and ensures the path ends in `/` so the entry page is the
/// storefront root.
fn normalize_base_url(base_url: &str) -> Result<Url, ShopError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| ShopError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ShopError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
