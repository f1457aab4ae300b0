//! Discovery of the storefront's Next.js build ID.
//!
//! The data endpoint path embeds a per-deployment build ID that is only
//! published inside the rendered entry page. [`BuildIdResolver`] fetches that
//! page, runs [`STRATEGIES`] in order until one yields an ID, and caches the
//! result in a [`BuildIdCache`].

use std::sync::LazyLock;

use chrono::{SubsecRound, Utc};
use regex::Regex;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use tokio::sync::Mutex;

use crate::cache::BuildIdCache;
use crate::error::ShopError;
use crate::http::get_text;

static INLINE_BUILD_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""buildId"\s*:\s*"([^"]+)""#).expect("valid inline build id regex")
});
static STATIC_ASSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/_next/static/([^/]+)/_").expect("valid static asset regex")
});
static SCRIPT_SRC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("valid script selector"));

/// A pure extraction strategy: entry page HTML in, build ID out.
pub type Strategy = fn(&str) -> Option<String>;

/// Extraction strategies in priority order. The first `Some` wins.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("inline-json", from_inline_json),
    ("script-src", from_script_src),
];

/// Finds the `"buildId":"…"` assignment that Next.js serialises into
/// `__NEXT_DATA__`. A single regex scan over the raw page.
#[must_use]
pub fn from_inline_json(html: &str) -> Option<String> {
    INLINE_BUILD_ID_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds the build ID in a static chunk path such as
/// `/_next/static/<buildId>/_buildManifest.js`, taking the first matching
/// `<script src>` in document order.
///
/// Tolerates attribute reordering and quoting differences because the page is
/// parsed as HTML rather than scanned as text.
#[must_use]
pub fn from_script_src(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SRC_SELECTOR)
        .filter_map(|el| el.value().attr("src"))
        .find_map(|src| {
            STATIC_ASSET_RE
                .captures(src)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
}

/// Runs [`STRATEGIES`] in order and returns the first hit with the name of the
/// strategy that produced it.
#[must_use]
pub fn extract_build_id(html: &str) -> Option<(&'static str, String)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(html).map(|id| (*name, id)))
}

/// Resolves and caches the storefront build ID.
///
/// Resolutions are single-flight: concurrent callers that miss the cache queue
/// on one lock, and whoever acquires it after another caller finished reuses
/// that result instead of fetching the entry page again.
pub struct BuildIdResolver {
    client: Client,
    entry_url: Url,
    cache: BuildIdCache,
    resolving: Mutex<()>,
}

impl BuildIdResolver {
    #[must_use]
    pub fn new(client: Client, base_url: &Url, cache: BuildIdCache) -> Self {
        Self {
            client,
            entry_url: base_url.clone(),
            cache,
            resolving: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &BuildIdCache {
        &self.cache
    }

    /// Returns the current build ID.
    ///
    /// Served from the cache while it is fresh unless `force_refresh` is set,
    /// in which case the entry page is always consulted (or the result of a
    /// refresh that completed while this call was waiting is reused).
    ///
    /// # Errors
    ///
    /// - [`ShopError::Fetch`] if the entry page returned a non-2xx status or the
    ///   request failed (timeout, connection error).
    /// - [`ShopError::BuildIdExtraction`] if no strategy found a build ID.
    pub async fn resolve(&self, force_refresh: bool) -> Result<String, ShopError> {
        // Millisecond precision, matching what the file store persists.
        let requested_at = Utc::now().trunc_subsecs(3);

        if !force_refresh {
            if let Some(entry) = self.cache.fresh(requested_at) {
                tracing::debug!(build_id = %entry.build_id, "build ID cache hit");
                return Ok(entry.build_id);
            }
        }

        let _guard = self.resolving.lock().await;

        // Another caller may have resolved while we waited for the lock.
        if let Some(entry) = self.cache.read() {
            let resolved_meanwhile = entry.resolved_at >= requested_at;
            if resolved_meanwhile || (!force_refresh && self.cache.is_valid(&entry, Utc::now())) {
                tracing::debug!(build_id = %entry.build_id, "reusing build ID resolved by concurrent caller");
                return Ok(entry.build_id);
            }
        }

        let html = self.fetch_entry_page().await?;
        let Some((strategy, build_id)) = extract_build_id(&html) else {
            tracing::error!(url = %self.entry_url, "no build ID found in storefront entry page");
            return Err(ShopError::build_id_extraction(&html));
        };

        tracing::info!(%build_id, strategy, forced = force_refresh, "resolved storefront build ID");
        self.cache.write(&build_id);
        Ok(build_id)
    }

    async fn fetch_entry_page(&self) -> Result<String, ShopError> {
        tracing::debug!(url = %self.entry_url, "fetching storefront entry page");
        get_text(
            &self.client,
            &self.entry_url,
            "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
        )
        .await
    }
}

impl std::fmt::Debug for BuildIdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildIdResolver")
            .field("entry_url", &self.entry_url.as_str())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
